//! 配置错误
//!
//! 核心引擎假定输入已经校验；这里是构建输入时可能出现的错误。

use thiserror::Error;

use super::scenario::MAX_SLOT_BITS;

/// 场景描述校验失败
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("unsupported schema_version {0}")]
    SchemaVersion(u32),
    #[error("at least two endpoints are required, got {0}")]
    TooFewEndpoints(usize),
    #[error("payload size must be positive")]
    EmptyPayload,
    #[error("packets_each must be positive")]
    NoPackets,
    #[error("medium bit rate must be positive")]
    ZeroBitRate,
    #[error("slot length must be positive")]
    ZeroSlot,
    #[error("slot length {0} bits exceeds {max} bits", max = MAX_SLOT_BITS)]
    SlotTooLong(u64),
    #[error("target rate must be positive")]
    ZeroTargetRate,
    #[error("target rate {target_bps} bps exceeds medium rate {bit_rate_bps} bps")]
    TargetAboveMedium { target_bps: u64, bit_rate_bps: u64 },
    #[error("endpoint {endpoint} position {position_m} m lies outside the ±{segment_m} m segment")]
    OutsideSegment {
        endpoint: usize,
        position_m: i64,
        segment_m: u32,
    },
    #[error(transparent)]
    Workload(#[from] WorkloadError),
}

/// 端点表与初始调度不满足引擎前置条件
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkloadError {
    #[error("workload has no endpoints")]
    NoEndpoints,
    #[error("endpoint at index {index} carries id {id}")]
    MisplacedEndpoint { index: usize, id: usize },
    #[error("endpoint {0} is paired with itself")]
    SelfPeer(usize),
    #[error("endpoint {endpoint} is paired with unknown endpoint {peer}")]
    UnknownPeer { endpoint: usize, peer: usize },
    #[error("attempt {attempt} references unknown endpoint {endpoint}")]
    UnknownEndpoint { attempt: u64, endpoint: usize },
    #[error("attempt {attempt} sends from {src} to itself")]
    SelfAddressed { attempt: u64, src: usize },
    #[error("attempt {attempt} sends from {src} to {dst}, which is not its peer")]
    OffPeer { attempt: u64, src: usize, dst: usize },
}
