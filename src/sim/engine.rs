//! 仿真引擎
//!
//! 逐 tick 推进的 CSMA/CD 引擎。每个 tick 依次执行：
//! 1. 回收已经送达的在线帧；
//! 2. 尝试准入待发送队列的队首；
//! 3. 介质上多于一个帧时全部判为冲突并退避；
//! 4. 时钟加一。

use rand::Rng;
use tracing::{debug, info, trace};

use super::backoff::{self, Backoff};
use super::time::SimTime;
use super::workload::Workload;
use crate::net::{Attempt, Endpoint, EndpointId, Medium, Stats};
use crate::queue::{PendingQueue, WireSet};
use crate::viz::VizLogger;

/// 引擎运行结束后交给统计/报告层的结果
#[derive(Debug)]
pub struct Outcome {
    pub endpoints: Vec<Endpoint>,
    pub completed: Vec<Attempt>,
    pub stats: Stats,
    /// 引擎停止时的时钟
    pub end: SimTime,
}

/// CSMA/CD 引擎：持有全部仿真状态。随机源通过 `R` 注入。
pub struct Engine<R> {
    pub(crate) medium: Medium,
    pub(crate) endpoints: Vec<Endpoint>,
    pub(crate) pending: PendingQueue,
    pub(crate) wire: WireSet,
    pub(crate) completed: Vec<Attempt>,
    pub(crate) stats: Stats,
    pub(crate) now: SimTime,
    rng: R,
    pub viz: Option<VizLogger>,
}

impl<R: Rng> Engine<R> {
    pub fn new(medium: Medium, workload: Workload, rng: R) -> Self {
        let Workload {
            endpoints,
            attempts,
        } = workload;
        let stats = Stats {
            initial_frames: attempts.len() as u64,
            ..Stats::default()
        };
        let mut pending = PendingQueue::new();
        pending.extend(attempts);
        Self {
            medium,
            endpoints,
            pending,
            wire: WireSet::default(),
            completed: Vec::new(),
            stats,
            now: SimTime::ZERO,
            rng,
            viz: None,
        }
    }

    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn medium(&self) -> &Medium {
        &self.medium
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn pending(&self) -> &PendingQueue {
        &self.pending
    }

    pub fn wire(&self) -> &WireSet {
        &self.wire
    }

    pub fn completed(&self) -> &[Attempt] {
        &self.completed
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// 待发送队列与介质都为空
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.wire.is_empty()
    }

    /// 两个端点之间的传播时延
    pub fn propagation_delay(&self, a: EndpointId, b: EndpointId) -> SimTime {
        self.medium
            .propagation_delay(&self.endpoints[a.0], &self.endpoints[b.0])
    }

    /// 执行一个 tick
    pub fn step(&mut self) {
        let now = self.now;
        trace!(
            now = now.0,
            pending = self.pending.len(),
            on_wire = self.wire.len(),
            "tick"
        );

        self.retire_finished(now);
        self.admit_head(now);
        if self.wire.len() > 1 {
            self.resolve_collision(now);
        }

        self.now = now.after(1);
    }

    /// 运行直到待发送队列和介质都为空。
    ///
    /// 重传次数有上限，所以每个尝试最终要么完成要么被丢弃，循环必然终止。
    #[tracing::instrument(skip(self))]
    pub fn run(&mut self) {
        info!(
            endpoints = self.endpoints.len(),
            frames = self.stats.initial_frames,
            "▶️  开始运行仿真"
        );

        while !self.is_idle() {
            self.step();
        }

        info!(
            final_time = self.now.0,
            completed = self.completed.len(),
            dropped = self.stats.dropped_frames,
            retried = self.stats.retried_frames,
            collisions = self.stats.collisions,
            "✅ 仿真完成"
        );
    }

    /// 运行直到空闲或时钟到达 `until`（不执行 `until` 这个 tick）。
    pub fn run_until(&mut self, until: SimTime) {
        while !self.is_idle() && self.now < until {
            self.step();
        }
        debug!(now = self.now.0, idle = self.is_idle(), "run_until 结束");
    }

    /// 交出结果
    pub fn into_outcome(self) -> Outcome {
        Outcome {
            endpoints: self.endpoints,
            completed: self.completed,
            stats: self.stats,
            end: self.now,
        }
    }

    fn retire_finished(&mut self, now: SimTime) {
        if self.wire.is_empty() {
            return;
        }
        let medium = &self.medium;
        let endpoints = &self.endpoints;
        let done = self.wire.retire(|a| {
            let prop = medium.propagation_delay(&endpoints[a.src.0], &endpoints[a.dst.0]);
            a.finish_deadline(prop) <= now
        });

        for mut attempt in done {
            attempt.finished_at = Some(now);
            debug!(
                attempt = attempt.id.0,
                src = attempt.src.0,
                dst = attempt.dst.0,
                retries = attempt.retries,
                now = now.0,
                "帧送达"
            );
            self.viz_complete(now, &attempt);
            self.completed.push(attempt);
        }
    }

    fn admit_head(&mut self, now: SimTime) {
        let ready = match self.pending.peek() {
            Some(head) if head.time_slot <= now => {
                self.medium
                    .medium_clear(&self.endpoints, head.src, self.wire.as_slice(), now)
            }
            _ => false,
        };
        if !ready {
            return;
        }
        let Some(mut attempt) = self.pending.pop() else {
            return;
        };

        // 被载波侦听推迟过的帧从准入这一刻才真正开始发送
        attempt.time_slot = now;
        self.endpoints[attempt.src.0].mark_sent(now);
        trace!(attempt = attempt.id.0, src = attempt.src.0, now = now.0, "帧上线");
        self.viz_admit(now, &attempt);
        self.wire.push(attempt);
    }

    fn resolve_collision(&mut self, now: SimTime) {
        let collided = self.wire.evict_all();
        self.stats.collisions += 1;
        debug!(now = now.0, on_wire = collided.len(), "💥 介质冲突");
        self.viz_collision(now, collided.len());

        let slot = self.medium.retry_slot();
        for mut attempt in collided {
            attempt.retries += 1;
            match backoff::draw(attempt.retries, &mut self.rng) {
                Backoff::Drop => {
                    self.stats.dropped_frames += 1;
                    debug!(
                        attempt = attempt.id.0,
                        retries = attempt.retries,
                        "重传次数耗尽，丢弃帧"
                    );
                    self.viz_drop(now, &attempt);
                }
                Backoff::Retry { slots } => {
                    attempt.time_slot = now.after(slots.saturating_mul(slot.0));
                    self.stats.retried_frames += 1;
                    trace!(
                        attempt = attempt.id.0,
                        retries = attempt.retries,
                        slots,
                        next_slot = attempt.time_slot.0,
                        "退避后重新排队"
                    );
                    self.viz_backoff(now, &attempt, slots);
                    self.pending.push(attempt);
                }
            }
        }
    }
}
