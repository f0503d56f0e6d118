//! 仿真时间类型
//!
//! 时钟粒度为一个 bit-time：介质上发送 1 bit 所需的时间。

/// 仿真时间（tick，一个 tick = 一个 bit-time）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// 向后推进 `ticks`，溢出时饱和。
    pub fn after(self, ticks: u64) -> SimTime {
        SimTime(self.0.saturating_add(ticks))
    }

    /// 距离 `earlier` 经过的 tick 数；`earlier` 在后面时返回 0。
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// 按介质速率把 tick 数换算为秒
    pub fn ticks_to_secs(ticks: u64, bit_rate_bps: u64) -> f64 {
        if bit_rate_bps == 0 {
            return f64::INFINITY;
        }
        ticks as f64 / bit_rate_bps as f64
    }
}
