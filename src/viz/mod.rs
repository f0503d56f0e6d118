//! 仿真事件记录（用于离线回放）
//!
//! 设计目标：
//! - **结构化**：用 JSON 事件而不是解析文本日志
//! - **轻量**：事件只在内存中收集，仿真结束后一次写出
//! - **可回放**：每个事件带 tick 时间戳和尝试 id，可按端点过滤

mod types;

pub use types::{VizEndpointInfo, VizEvent, VizEventKind, VizLogger};
