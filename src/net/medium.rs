//! 共享介质
//!
//! 传播时延模型与载波侦听。介质速率决定 tick 的物理长度。

use super::attempt::Attempt;
use super::endpoint::Endpoint;
use super::id::EndpointId;
use crate::sim::SimTime;
use tracing::trace;

/// 铜缆中的信号传播速度（m/s）
pub const SPEED_OF_LIGHT_IN_COPPER_MPS: u64 = 210_000_000;
/// 标准冲突时隙（bit）
pub const DEFAULT_SLOT_BITS: u64 = 512;
/// 10 Mbps 以太网
pub const DEFAULT_BIT_RATE_BPS: u64 = 10_000_000;

/// 共享介质参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Medium {
    pub bit_rate_bps: u64,
    /// 一个退避时隙的长度（bit-time）
    pub slot_bits: u64,
}

impl Default for Medium {
    fn default() -> Self {
        Self {
            bit_rate_bps: DEFAULT_BIT_RATE_BPS,
            slot_bits: DEFAULT_SLOT_BITS,
        }
    }
}

impl Medium {
    pub fn new(bit_rate_bps: u64, slot_bits: u64) -> Self {
        Self {
            bit_rate_bps,
            slot_bits,
        }
    }

    /// 一个退避时隙对应的 tick 数
    pub fn retry_slot(&self) -> SimTime {
        SimTime(self.slot_bits)
    }

    /// tick 数换算为秒
    pub fn ticks_to_secs(&self, ticks: u64) -> f64 {
        SimTime::ticks_to_secs(ticks, self.bit_rate_bps)
    }

    /// 两个端点之间的传播时延
    ///
    /// ceil(距离 / 铜缆光速 / bit-time)，整数运算保证只会向上取整。
    pub fn propagation_delay(&self, a: &Endpoint, b: &Endpoint) -> SimTime {
        let meters = separation_m(a.position_m, b.position_m) as u128;
        let ticks =
            (meters * self.bit_rate_bps as u128).div_ceil(SPEED_OF_LIGHT_IN_COPPER_MPS as u128);
        SimTime(ticks.min(u64::MAX as u128) as u64)
    }

    /// 载波侦听：`sensing` 在 `now` 时刻是否认为介质空闲
    ///
    /// 只要任一在线帧的信号已经传到侦听点，介质就是忙的。
    pub fn medium_clear(
        &self,
        endpoints: &[Endpoint],
        sensing: EndpointId,
        on_wire: &[Attempt],
        now: SimTime,
    ) -> bool {
        let here = &endpoints[sensing.0];
        let busy = on_wire.iter().any(|ev| {
            let reach = self.propagation_delay(here, &endpoints[ev.src.0]);
            let elapsed = now.since(ev.time_slot);
            trace!(attempt = ev.id.0, elapsed, reach = reach.0, "侦听在线帧");
            elapsed >= reach.0
        });
        !busy
    }
}

/// 两个位置之间的距离（米）
///
/// 同侧取差的绝对值；异侧或任一在中心点时取绝对值之和。
pub fn separation_m(a: i64, b: i64) -> u64 {
    let same_side = (a < 0 && b < 0) || (a > 0 && b > 0);
    if same_side {
        a.abs_diff(b)
    } else {
        a.unsigned_abs().saturating_add(b.unsigned_abs())
    }
}
