//! 场景描述
//!
//! scenario.json 的 serde 结构：介质参数、端点布局和帧流参数。
//! `build` 先校验，再生成交给引擎的 `Workload`。

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::ScenarioError;
use super::workload::{StreamOpts, Workload, schedule_streams};
use crate::net::{DEFAULT_BIT_RATE_BPS, DEFAULT_SLOT_BITS, Medium};
use crate::topo::bus::{BusOpts, build_bus, build_random_bus};

pub const SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_SEGMENT_M: u32 = 250;
/// Longest accepted backoff slot, in bit-times.
pub const MAX_SLOT_BITS: u64 = u32::MAX as u64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub schema_version: u32,
    #[serde(default)]
    pub meta: Option<ScenarioMeta>,
    #[serde(default)]
    pub medium: Option<MediumSpec>,
    pub layout: LayoutSpec,
    pub traffic: TrafficSpec,
    /// Seed for layout, start offsets and backoff draws.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediumSpec {
    #[serde(default)]
    pub bit_rate_bps: Option<u64>,
    #[serde(default)]
    pub slot_bits: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutSpec {
    /// Endpoints placed uniformly on the segment, each paired with a random peer.
    Random {
        count: usize,
        #[serde(default)]
        segment_m: Option<u32>,
    },
    Explicit {
        #[serde(default)]
        segment_m: Option<u32>,
        endpoints: Vec<EndpointSpec>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointSpec {
    /// Signed offset from the electrical center of the segment.
    pub position_m: i64,
    /// Index of the endpoint this one streams to.
    pub peer: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficSpec {
    pub packets_each: u32,
    #[serde(default)]
    pub payload_bytes: Option<u32>,
    #[serde(default)]
    pub target_bps: Option<u64>,
    #[serde(default)]
    pub start_jitter: Option<u64>,
    #[serde(default)]
    pub gap_jitter: Option<u64>,
}

impl ScenarioSpec {
    pub fn medium(&self) -> Medium {
        let spec = self.medium.clone().unwrap_or_default();
        Medium::new(
            spec.bit_rate_bps.unwrap_or(DEFAULT_BIT_RATE_BPS),
            spec.slot_bits.unwrap_or(DEFAULT_SLOT_BITS),
        )
    }

    pub fn stream_opts(&self) -> StreamOpts {
        let defaults = StreamOpts::default();
        let t = &self.traffic;
        StreamOpts {
            packets_each: t.packets_each,
            payload_bytes: t.payload_bytes.unwrap_or(defaults.payload_bytes),
            target_bps: t.target_bps.unwrap_or(defaults.target_bps),
            start_jitter: t.start_jitter.unwrap_or(defaults.start_jitter),
            gap_jitter: t.gap_jitter.unwrap_or(defaults.gap_jitter),
        }
    }

    /// Checks everything the engine takes for granted, apart from the
    /// endpoint pairing which `Workload::new` verifies.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ScenarioError::SchemaVersion(self.schema_version));
        }
        let medium = self.medium();
        if medium.bit_rate_bps == 0 {
            return Err(ScenarioError::ZeroBitRate);
        }
        if medium.slot_bits == 0 {
            return Err(ScenarioError::ZeroSlot);
        }
        if medium.slot_bits > MAX_SLOT_BITS {
            return Err(ScenarioError::SlotTooLong(medium.slot_bits));
        }

        let opts = self.stream_opts();
        if opts.packets_each == 0 {
            return Err(ScenarioError::NoPackets);
        }
        if opts.payload_bytes == 0 {
            return Err(ScenarioError::EmptyPayload);
        }
        if opts.target_bps == 0 {
            return Err(ScenarioError::ZeroTargetRate);
        }
        if opts.target_bps > medium.bit_rate_bps {
            return Err(ScenarioError::TargetAboveMedium {
                target_bps: opts.target_bps,
                bit_rate_bps: medium.bit_rate_bps,
            });
        }

        match &self.layout {
            LayoutSpec::Random { count, .. } => {
                if *count < 2 {
                    return Err(ScenarioError::TooFewEndpoints(*count));
                }
            }
            LayoutSpec::Explicit {
                segment_m,
                endpoints,
            } => {
                if endpoints.len() < 2 {
                    return Err(ScenarioError::TooFewEndpoints(endpoints.len()));
                }
                let segment_m = segment_m.unwrap_or(DEFAULT_SEGMENT_M);
                for (endpoint, ep) in endpoints.iter().enumerate() {
                    if ep.position_m.unsigned_abs() > segment_m as u64 {
                        return Err(ScenarioError::OutsideSegment {
                            endpoint,
                            position_m: ep.position_m,
                            segment_m,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Validates the scenario and lays out endpoints and frame streams.
    pub fn build<R: Rng>(&self, rng: &mut R) -> Result<(Medium, Workload), ScenarioError> {
        self.validate()?;
        let medium = self.medium();

        let endpoints = match &self.layout {
            LayoutSpec::Random { count, segment_m } => {
                let opts = BusOpts {
                    endpoints: *count,
                    segment_m: segment_m.unwrap_or(DEFAULT_SEGMENT_M),
                };
                build_random_bus(&opts, &mut *rng)
            }
            LayoutSpec::Explicit { endpoints, .. } => {
                let placements = endpoints
                    .iter()
                    .map(|ep| (ep.position_m, ep.peer))
                    .collect::<Vec<_>>();
                build_bus(&placements)
            }
        };

        let attempts = schedule_streams(&endpoints, &self.stream_opts(), &medium, rng);
        let workload = Workload::new(endpoints, attempts)?;
        Ok((medium, workload))
    }
}
