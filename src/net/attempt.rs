//! 发送尝试
//!
//! 一次把帧放上介质的尝试，冲突后带着重传计数重新排队。

use super::frame::Frame;
use super::id::{AttemptId, EndpointId};
use crate::sim::SimTime;

/// 调度中的一次发送尝试
#[derive(Debug, Clone)]
pub struct Attempt {
    pub id: AttemptId,
    pub src: EndpointId,
    pub dst: EndpointId,
    pub frame: Frame,
    /// 下一次可以尝试发送的 tick
    pub(crate) time_slot: SimTime,
    pub(crate) retries: u8,
    pub(crate) started_at: SimTime,
    pub(crate) finished_at: Option<SimTime>,
}

impl Attempt {
    pub fn new(
        id: AttemptId,
        src: EndpointId,
        dst: EndpointId,
        frame: Frame,
        time_slot: SimTime,
    ) -> Self {
        Self {
            id,
            src,
            dst,
            frame,
            time_slot,
            retries: 0,
            started_at: time_slot,
            finished_at: None,
        }
    }

    pub fn time_slot(&self) -> SimTime {
        self.time_slot
    }

    pub fn retries(&self) -> u8 {
        self.retries
    }

    /// 首次创建时的时隙，重传不会改变它
    pub fn started_at(&self) -> SimTime {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<SimTime> {
        self.finished_at
    }

    /// 从首次调度到完成的总时延（tick）
    pub fn delay(&self) -> Option<u64> {
        self.finished_at.map(|t| t.since(self.started_at))
    }

    /// 帧尾到达目的端的时刻：开始发送 + 发送时长 + 传播时延
    pub fn finish_deadline(&self, propagation: SimTime) -> SimTime {
        self.time_slot
            .after(self.frame.tx_time().0)
            .after(propagation.0)
    }
}
