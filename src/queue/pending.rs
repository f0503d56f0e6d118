//! 待发送队列
//!
//! 始终按 `time_slot` 升序；时隙相同的尝试保持入队顺序。

use std::collections::VecDeque;

use crate::net::Attempt;

#[derive(Debug, Default)]
pub struct PendingQueue {
    q: VecDeque<Attempt>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 入队；插到所有时隙 <= 它的元素之后
    pub fn push(&mut self, attempt: Attempt) {
        let at = self.q.partition_point(|a| a.time_slot <= attempt.time_slot);
        self.q.insert(at, attempt);
    }

    pub fn pop(&mut self) -> Option<Attempt> {
        self.q.pop_front()
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    /// 队首（时隙最早）的尝试，不出队
    pub fn peek(&self) -> Option<&Attempt> {
        self.q.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attempt> {
        self.q.iter()
    }

    /// 队列是否按时隙升序
    pub fn is_sorted(&self) -> bool {
        self.q
            .iter()
            .zip(self.q.iter().skip(1))
            .all(|(a, b)| a.time_slot <= b.time_slot)
    }
}

impl Extend<Attempt> for PendingQueue {
    fn extend<I: IntoIterator<Item = Attempt>>(&mut self, iter: I) {
        for attempt in iter {
            self.push(attempt);
        }
    }
}
