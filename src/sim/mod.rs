//! 仿真核心模块
//!
//! 此模块包含逐 tick 推进的 CSMA/CD 引擎、退避状态机、仿真时间以及引擎输入的构建。

// 子模块声明
pub mod backoff;
mod engine;
mod engine_viz;
mod error;
mod scenario;
mod time;
mod workload;

// 重新导出公共接口
pub use backoff::Backoff;
pub use engine::{Engine, Outcome};
pub use error::{ScenarioError, WorkloadError};
pub use scenario::{
    DEFAULT_SEGMENT_M, EndpointSpec, LayoutSpec, MAX_SLOT_BITS, MediumSpec, SCHEMA_VERSION,
    ScenarioMeta, ScenarioSpec, TrafficSpec,
};
pub use time::SimTime;
pub use workload::{INTER_FRAME_GAP_BITS, StreamOpts, Workload, schedule_streams, stream_interval};
