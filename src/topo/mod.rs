//! 拓扑构建
//!
//! 单段总线：所有端点挂在同一条共享介质上。

pub mod bus;
