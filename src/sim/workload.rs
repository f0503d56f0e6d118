//! 引擎输入
//!
//! `Workload` 是端点表加上初始的发送尝试；`schedule_streams` 为每个源端点
//! 生成一条按目标速率发送的帧流。

use rand::Rng;
use tracing::debug;

use super::error::WorkloadError;
use super::time::SimTime;
use crate::net::{Attempt, AttemptId, Endpoint, Frame, Medium};

/// 帧间间隔（bit）
pub const INTER_FRAME_GAP_BITS: u64 = 96;

/// 已校验的引擎输入
#[derive(Debug, Clone)]
pub struct Workload {
    pub(crate) endpoints: Vec<Endpoint>,
    pub(crate) attempts: Vec<Attempt>,
}

impl Workload {
    /// 校验端点表与尝试引用的一致性
    pub fn new(endpoints: Vec<Endpoint>, attempts: Vec<Attempt>) -> Result<Self, WorkloadError> {
        if endpoints.is_empty() {
            return Err(WorkloadError::NoEndpoints);
        }
        let n = endpoints.len();
        for (index, ep) in endpoints.iter().enumerate() {
            if ep.id.0 != index {
                return Err(WorkloadError::MisplacedEndpoint { index, id: ep.id.0 });
            }
            if ep.peer.0 >= n {
                return Err(WorkloadError::UnknownPeer {
                    endpoint: index,
                    peer: ep.peer.0,
                });
            }
            if ep.peer == ep.id {
                return Err(WorkloadError::SelfPeer(index));
            }
        }
        for a in &attempts {
            for end in [a.src, a.dst] {
                if end.0 >= n {
                    return Err(WorkloadError::UnknownEndpoint {
                        attempt: a.id.0,
                        endpoint: end.0,
                    });
                }
            }
            if a.src == a.dst {
                return Err(WorkloadError::SelfAddressed {
                    attempt: a.id.0,
                    src: a.src.0,
                });
            }
            let peer = endpoints[a.src.0].peer;
            if a.dst != peer {
                return Err(WorkloadError::OffPeer {
                    attempt: a.id.0,
                    src: a.src.0,
                    dst: a.dst.0,
                });
            }
        }
        Ok(Self {
            endpoints,
            attempts,
        })
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }
}

/// 帧流参数
#[derive(Debug, Clone)]
pub struct StreamOpts {
    pub packets_each: u32,
    pub payload_bytes: u32,
    /// 每个源的目标发送速率（bps）
    pub target_bps: u64,
    /// 首帧偏移在 [0, start_jitter) 中随机选取
    pub start_jitter: u64,
    /// 每个帧间隔额外加上 [0, gap_jitter] 的随机抖动
    pub gap_jitter: u64,
}

impl Default for StreamOpts {
    fn default() -> Self {
        Self {
            packets_each: 128,
            // 64 字节头 + 512 字节数据
            payload_bytes: 576,
            target_bps: 1_500_000,
            start_jitter: 2 << 16,
            gap_jitter: 0,
        }
    }
}

/// 相邻两帧开始时刻的间隔（tick）
///
/// 按载荷计算达到目标速率所需的间隔，但不短于帧长加帧间隔。
pub fn stream_interval(frame: &Frame, bit_rate_bps: u64, target_bps: u64) -> u64 {
    let payload_bits = frame.payload_bytes() as u128 * 8;
    let paced = (payload_bits * bit_rate_bps as u128).div_ceil(target_bps.max(1) as u128);
    (paced.min(u64::MAX as u128) as u64).max(frame.wire_bits() + INTER_FRAME_GAP_BITS)
}

/// 为每个端点生成发往其对端的帧流
pub fn schedule_streams<R: Rng>(
    endpoints: &[Endpoint],
    opts: &StreamOpts,
    medium: &Medium,
    rng: &mut R,
) -> Vec<Attempt> {
    let frame = Frame::new(opts.payload_bytes);
    let interval = stream_interval(&frame, medium.bit_rate_bps, opts.target_bps);
    let mut attempts = Vec::with_capacity(endpoints.len() * opts.packets_each as usize);
    let mut next_id = 0u64;

    for ep in endpoints {
        debug!(src = ep.id.0, dst = ep.peer.0, mac = %ep.mac, interval, "配置端点帧流");

        let mut offset = if opts.start_jitter > 0 {
            rng.random_range(0..opts.start_jitter)
        } else {
            0
        };
        for _ in 0..opts.packets_each {
            attempts.push(Attempt::new(
                AttemptId(next_id),
                ep.id,
                ep.peer,
                frame,
                SimTime(offset),
            ));
            next_id += 1;

            let jitter = if opts.gap_jitter > 0 {
                rng.random_range(0..=opts.gap_jitter)
            } else {
                0
            };
            offset = offset.saturating_add(interval).saturating_add(jitter);
        }
    }
    attempts
}
