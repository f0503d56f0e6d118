//! 端点类型
//!
//! 定义共享介质上的主机：位置、对端以及引擎写入的收发时间戳。

use std::fmt;

use rand::RngCore;

use super::id::EndpointId;
use crate::sim::SimTime;

/// MAC 地址（只用于展示）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// 随机生成一个 MAC 地址
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut octets = [0u8; 6];
        rng.fill_bytes(&mut octets);
        MacAddr(octets)
    }

    /// 由端点下标派生一个确定的本地管理地址
    pub fn local(index: usize) -> Self {
        let b = (index as u32).to_be_bytes();
        MacAddr([0x02, 0x00, b[0], b[1], b[2], b[3]])
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// 仿真主机
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub id: EndpointId,
    pub mac: MacAddr,
    /// 相对介质电气中心的位置（米），符号表示在哪一侧
    pub position_m: i64,
    /// 持续发送的对端，构建后不再改变
    pub peer: EndpointId,
    pub(crate) first_seen: Option<SimTime>,
    pub(crate) last_seen: Option<SimTime>,
}

impl Endpoint {
    pub fn new(id: EndpointId, mac: MacAddr, position_m: i64, peer: EndpointId) -> Self {
        Self {
            id,
            mac,
            position_m,
            peer,
            first_seen: None,
            last_seen: None,
        }
    }

    /// 第一次有帧被放上介质的时刻
    pub fn first_seen(&self) -> Option<SimTime> {
        self.first_seen
    }

    /// 最近一次有帧被放上介质的时刻
    pub fn last_seen(&self) -> Option<SimTime> {
        self.last_seen
    }

    pub(crate) fn mark_sent(&mut self, now: SimTime) {
        self.first_seen.get_or_insert(now);
        self.last_seen = Some(now);
    }
}
