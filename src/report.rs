//! 结果报告
//!
//! 把引擎结果和逐流统计格式化为表格或 CSV。核心引擎不做任何输出。

use std::fmt::Write as _;
use std::io;

use serde::Serialize;

use crate::net::{Endpoint, FlowStats, Stats};

/// CSV 中的一行
#[derive(Debug, Clone, Serialize)]
pub struct FlowRow {
    pub src: String,
    pub dst: String,
    pub frames: u64,
    pub payload_bytes: u64,
    pub avg_delay_ms: Option<f64>,
    pub throughput_kbps: Option<f64>,
}

impl FlowRow {
    pub fn new(flow: &FlowStats, endpoints: &[Endpoint]) -> Self {
        Self {
            src: endpoints[flow.src.0].mac.to_string(),
            dst: endpoints[flow.dst.0].mac.to_string(),
            frames: flow.frames,
            payload_bytes: flow.payload_bytes,
            avg_delay_ms: flow.avg_delay_secs.map(|s| s * 1e3),
            throughput_kbps: flow.throughput_bps.map(|bps| bps / 1e3),
        }
    }
}

pub fn flow_rows(flows: &[FlowStats], endpoints: &[Endpoint]) -> Vec<FlowRow> {
    flows.iter().map(|f| FlowRow::new(f, endpoints)).collect()
}

/// 汇总行
pub fn summary_line(stats: &Stats) -> String {
    format!(
        concat!(
            "Simulation complete. Out of {} initial frames queued, ",
            "we had {} dropped frames and {} retried frames ({} collisions)"
        ),
        stats.initial_frames, stats.dropped_frames, stats.retried_frames, stats.collisions
    )
}

fn opt(v: Option<f64>, precision: usize) -> String {
    v.map_or_else(|| "-".to_string(), |x| format!("{x:.precision$}"))
}

/// 文本表格
pub fn render_table(rows: &[FlowRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<17}  {:<17}  {:>7}  {:>10}  {:>14}  {:>16}",
        "source", "destination", "frames", "bytes", "avg delay (ms)", "throughput (kbps)"
    );
    for r in rows {
        let _ = writeln!(
            out,
            "{:<17}  {:<17}  {:>7}  {:>10}  {:>14}  {:>16}",
            r.src,
            r.dst,
            r.frames,
            r.payload_bytes,
            opt(r.avg_delay_ms, 3),
            opt(r.throughput_kbps, 1)
        );
    }
    out
}

/// 写出 CSV（带表头）
pub fn write_csv<W: io::Write>(writer: W, rows: &[FlowRow]) -> csv::Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    for r in rows {
        w.serialize(r)?;
    }
    w.flush()?;
    Ok(())
}
