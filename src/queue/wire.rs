//! 介质上的尝试集合
//!
//! 同一时刻在线的帧通常只有一个；超过一个即视为冲突。

use crate::net::Attempt;

#[derive(Debug, Default)]
pub struct WireSet {
    on_wire: Vec<Attempt>,
}

impl WireSet {
    pub fn push(&mut self, attempt: Attempt) {
        self.on_wire.push(attempt);
    }

    pub fn len(&self) -> usize {
        self.on_wire.len()
    }

    pub fn is_empty(&self) -> bool {
        self.on_wire.is_empty()
    }

    pub fn as_slice(&self) -> &[Attempt] {
        &self.on_wire
    }

    /// 取出所有满足 `finished` 的尝试，其余留在介质上
    pub fn retire<F>(&mut self, mut finished: F) -> Vec<Attempt>
    where
        F: FnMut(&Attempt) -> bool,
    {
        let (done, still): (Vec<_>, Vec<_>) = std::mem::take(&mut self.on_wire)
            .into_iter()
            .partition(|a| finished(a));
        self.on_wire = still;
        done
    }

    /// 清空介质（冲突后全部驱逐）
    pub fn evict_all(&mut self) -> Vec<Attempt> {
        std::mem::take(&mut self.on_wire)
    }
}
