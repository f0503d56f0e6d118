//! 队列（Pending Queue 与 Wire Set）
//!
//! 待发送的尝试按时隙排序等待准入；准入后进入介质集合，
//! 直到完成或发生冲突。

mod pending;
mod wire;

pub use pending::PendingQueue;
pub use wire::WireSet;
