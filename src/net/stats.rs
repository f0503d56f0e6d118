//! 统计信息
//!
//! 引擎计数器，以及从完成集合推导的逐流吞吐量与时延。

use std::collections::HashMap;

use super::attempt::Attempt;
use super::endpoint::Endpoint;
use super::id::EndpointId;
use super::medium::Medium;

/// 仿真计数器
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub initial_frames: u64,
    pub dropped_frames: u64,
    pub retried_frames: u64,
    /// 发生冲突的 tick 数
    pub collisions: u64,
}

/// 单个 (源, 目的) 流的统计
#[derive(Debug, Clone, PartialEq)]
pub struct FlowStats {
    pub src: EndpointId,
    pub dst: EndpointId,
    pub frames: u64,
    pub payload_bytes: u64,
    /// 平均时延（秒），没有送达的帧时为 None
    pub avg_delay_secs: Option<f64>,
    /// 实际吞吐量（bps），时间窗口为零时为 None
    pub throughput_bps: Option<f64>,
}

impl FlowStats {
    /// 按端点顺序为每个 (源, 对端) 流汇总完成集合
    pub fn derive(
        endpoints: &[Endpoint],
        completed: &[Attempt],
        medium: &Medium,
    ) -> Vec<FlowStats> {
        #[derive(Default)]
        struct Acc {
            frames: u64,
            bytes: u64,
            delay_ticks: u128,
        }

        let mut by_flow: HashMap<(EndpointId, EndpointId), Acc> = HashMap::new();
        for a in completed {
            let Some(delay) = a.delay() else { continue };
            let acc = by_flow.entry((a.src, a.dst)).or_default();
            acc.frames += 1;
            acc.bytes += a.frame.payload_bytes() as u64;
            acc.delay_ticks += delay as u128;
        }

        endpoints
            .iter()
            .map(|ep| {
                let acc = by_flow.remove(&(ep.id, ep.peer)).unwrap_or_default();
                let avg_delay_secs = (acc.frames > 0).then(|| {
                    let mean_ticks = acc.delay_ticks as f64 / acc.frames as f64;
                    mean_ticks / medium.bit_rate_bps as f64
                });
                let elapsed = match (ep.first_seen(), ep.last_seen()) {
                    (Some(first), Some(last)) => last.since(first),
                    _ => 0,
                };
                let throughput_bps = (elapsed > 0 && acc.frames > 0)
                    .then(|| (acc.bytes * 8) as f64 / medium.ticks_to_secs(elapsed));
                FlowStats {
                    src: ep.id,
                    dst: ep.peer,
                    frames: acc.frames,
                    payload_bytes: acc.bytes,
                    avg_delay_secs,
                    throughput_bps,
                }
            })
            .collect()
    }
}
