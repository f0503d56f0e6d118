//! 截断二进制指数退避
//!
//! 第 n 次冲突后在 [0, 2^n - 1] 个时隙中均匀选择等待时间；
//! 第 11 次起窗口固定为 [0, 10]；超过 16 次重传则丢弃。

use rand::Rng;

/// 丢弃前允许的最大重传次数
pub const MAX_RETRIES: u8 = 16;
/// 窗口停止翻倍的重传次数
pub const BACKOFF_LIMIT: u8 = 10;
/// 截断后的窗口上界（含）
pub const CAPPED_WINDOW_MAX: u64 = 10;

/// 一次冲突后的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// 等待 `slots` 个退避时隙后重新排队
    Retry { slots: u64 },
    /// 重传次数耗尽
    Drop,
}

/// 第 `retries` 次冲突后可选的最大时隙数（含）；`None` 表示应丢弃。
pub fn window_max(retries: u8) -> Option<u64> {
    match retries {
        0..=BACKOFF_LIMIT => Some((1u64 << retries) - 1),
        r if r <= MAX_RETRIES => Some(CAPPED_WINDOW_MAX),
        _ => None,
    }
}

/// 为已递增过的重传计数抽取退避结果
pub fn draw<R: Rng>(retries: u8, rng: &mut R) -> Backoff {
    match window_max(retries) {
        Some(max) => Backoff::Retry {
            slots: rng.random_range(0..=max),
        },
        None => Backoff::Drop,
    }
}
