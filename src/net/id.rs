//! 标识符类型
//!
//! 定义端点和发送尝试的唯一标识符。

/// 端点标识符（端点表中的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EndpointId(pub usize);

/// 发送尝试标识符（重传时保持不变）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(pub u64);
