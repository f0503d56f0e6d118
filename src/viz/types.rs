use serde::{Deserialize, Serialize};

/// 事件类型
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VizEventKind {
    /// 仿真元信息（作为 t=0 的第一条事件）
    Meta {
        endpoints: Vec<VizEndpointInfo>,
        bit_rate_bps: u64,
        slot_bits: u64,
    },
    /// 尝试通过载波侦听，帧开始占用介质
    Admit,
    /// 帧完整送达目的端
    Complete { delay_ticks: u64 },
    /// 介质上同时有多个帧
    Collision { on_wire: usize },
    /// 冲突后重新排队
    Backoff {
        retries: u8,
        slots: u64,
        next_slot: u64,
    },
    /// 重传次数耗尽，丢弃
    Drop { retries: u8 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VizEndpointInfo {
    pub id: usize,
    pub mac: String,
    pub position_m: i64,
    pub peer: usize,
}

/// 一个可回放的事件（JSON）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VizEvent {
    /// 仿真时间（tick，和 `SimTime.0` 同口径）
    pub t: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst: Option<usize>,
    #[serde(flatten)]
    pub kind: VizEventKind,
}

/// 一个简单的事件收集器（存内存，仿真结束写 JSON 文件）
#[derive(Debug, Default)]
pub struct VizLogger {
    pub events: Vec<VizEvent>,
}

impl VizLogger {
    pub fn push(&mut self, ev: VizEvent) {
        self.events.push(ev);
    }
}
