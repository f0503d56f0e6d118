//! 帧类型
//!
//! 抽象的以太网帧：固定的成帧开销加上载荷。

use crate::sim::SimTime;

/// 成帧开销（bit）
pub const FRAMING_OVERHEAD_BITS: u64 = 42;

/// 以太网帧。只关心载荷大小，发送时长由它推导。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    payload_bytes: u32,
}

impl Frame {
    pub fn new(payload_bytes: u32) -> Self {
        Self { payload_bytes }
    }

    pub fn payload_bytes(&self) -> u32 {
        self.payload_bytes
    }

    /// 帧在介质上占用的总 bit 数
    pub fn wire_bits(&self) -> u64 {
        FRAMING_OVERHEAD_BITS + self.payload_bytes as u64 * 8
    }

    /// 发送时长：时钟为 1 bit/tick，因此与 `wire_bits` 相同
    pub fn tx_time(&self) -> SimTime {
        SimTime(self.wire_bits())
    }
}
