//! 共享介质网络模块
//!
//! 此模块包含端点、帧、发送尝试、传播时延/载波侦听模型以及统计。

// 子模块声明
mod attempt;
mod endpoint;
mod frame;
mod id;
mod medium;
mod stats;

// 重新导出公共接口
pub use attempt::Attempt;
pub use endpoint::{Endpoint, MacAddr};
pub use frame::{FRAMING_OVERHEAD_BITS, Frame};
pub use id::{AttemptId, EndpointId};
pub use medium::{
    DEFAULT_BIT_RATE_BPS, DEFAULT_SLOT_BITS, Medium, SPEED_OF_LIGHT_IN_COPPER_MPS, separation_m,
};
pub use stats::{FlowStats, Stats};
