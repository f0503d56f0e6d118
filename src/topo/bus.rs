//! 总线拓扑构建

use rand::Rng;
use tracing::debug;

use crate::net::{Endpoint, EndpointId, MacAddr};

/// 随机总线配置选项
#[derive(Debug, Clone)]
pub struct BusOpts {
    pub endpoints: usize,
    /// 半段长度（米）：位置落在 [-segment_m, segment_m]
    pub segment_m: u32,
}

impl Default for BusOpts {
    fn default() -> Self {
        Self {
            endpoints: 8,
            segment_m: 250,
        }
    }
}

/// 构建随机总线
///
/// 每个端点随机放在段上，随机选一个不是自己的对端，MAC 地址随机。
pub fn build_random_bus<R: Rng>(opts: &BusOpts, rng: &mut R) -> Vec<Endpoint> {
    let n = opts.endpoints;
    let seg = opts.segment_m as i64;
    let mut endpoints = Vec::with_capacity(n);
    for i in 0..n {
        let position_m = rng.random_range(-seg..=seg);
        // 少于两个端点时没有合法对端，交给 Workload::new 拒绝
        let peer = if n < 2 {
            i
        } else {
            let p = rng.random_range(0..n - 1);
            if p >= i { p + 1 } else { p }
        };
        let mac = MacAddr::random(&mut *rng);
        debug!(id = i, %mac, position_m, peer, "添加端点");
        endpoints.push(Endpoint::new(EndpointId(i), mac, position_m, EndpointId(peer)));
    }
    endpoints
}

/// 按给定的 (位置, 对端下标) 构建总线，MAC 地址由下标派生
pub fn build_bus(placements: &[(i64, usize)]) -> Vec<Endpoint> {
    placements
        .iter()
        .enumerate()
        .map(|(i, &(position_m, peer))| {
            Endpoint::new(EndpointId(i), MacAddr::local(i), position_m, EndpointId(peer))
        })
        .collect()
}
