//! 802.3 共享介质仿真
//!
//! 从命令行参数或 scenario.json 构建场景，运行 CSMA/CD 引擎并输出逐流统计。

use clap::Parser;
use csmacd_sim::net::FlowStats;
use csmacd_sim::report::{flow_rows, render_table, summary_line, write_csv};
use csmacd_sim::sim::{
    Engine, LayoutSpec, MediumSpec, SCHEMA_VERSION, ScenarioSpec, SimTime, TrafficSpec,
};
use csmacd_sim::viz::VizLogger;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "ethernet-sim",
    about = "802.3 CSMA/CD 共享介质仿真：每个端点向一个对端持续发送帧流"
)]
struct Args {
    /// Path to scenario.json; overrides the layout/traffic flags below
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// 端点数量
    #[arg(long, default_value_t = 8)]
    nodes: usize,
    /// 每个端点发送的帧数
    #[arg(long, default_value_t = 128)]
    packets: u32,
    /// 帧载荷（字节）
    #[arg(long, default_value_t = 576)]
    payload_bytes: u32,
    /// 每个端点的目标速率（kbps）
    #[arg(long, default_value_t = 1_500)]
    target_kbps: u64,
    /// 介质速率（Mbps）
    #[arg(long, default_value_t = 10)]
    bit_rate_mbps: u64,
    /// 半段长度（米）
    #[arg(long, default_value_t = 250)]
    segment_m: u32,
    /// 首帧随机偏移上界（tick）
    #[arg(long, default_value_t = 2 << 16)]
    start_jitter: u64,
    /// 帧间隔随机抖动上界（tick）
    #[arg(long, default_value_t = 0)]
    gap_jitter: u64,

    /// 随机种子；缺省时使用场景中的种子，否则随机
    #[arg(long)]
    seed: Option<u64>,
    /// 最多运行到多少 tick；缺省时运行到结束
    #[arg(long)]
    until_ticks: Option<u64>,

    /// Write per-flow statistics as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Write the event trace as JSON
    #[arg(long)]
    trace_json: Option<PathBuf>,
}

impl Args {
    fn scenario_from_flags(&self) -> ScenarioSpec {
        ScenarioSpec {
            schema_version: SCHEMA_VERSION,
            meta: None,
            medium: Some(MediumSpec {
                bit_rate_bps: Some(self.bit_rate_mbps.saturating_mul(1_000_000)),
                slot_bits: None,
            }),
            layout: LayoutSpec::Random {
                count: self.nodes,
                segment_m: Some(self.segment_m),
            },
            traffic: TrafficSpec {
                packets_each: self.packets,
                payload_bytes: Some(self.payload_bytes),
                target_bps: Some(self.target_kbps.saturating_mul(1_000)),
                start_jitter: Some(self.start_jitter),
                gap_jitter: Some(self.gap_jitter),
            },
            seed: None,
        }
    }
}

fn load_scenario(args: &Args) -> Result<ScenarioSpec, String> {
    let Some(path) = &args.scenario else {
        return Ok(args.scenario_from_flags());
    };
    let raw = fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| format!("parse {}: {e}", path.display()))
}

fn run(args: &Args) -> Result<(), String> {
    let scenario = load_scenario(args)?;
    let seed = args
        .seed
        .or(scenario.seed)
        .unwrap_or_else(rand::random::<u64>);
    tracing::info!(seed, "使用随机种子");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (medium, workload) = scenario.build(&mut rng).map_err(|e| e.to_string())?;

    let mut engine = Engine::new(medium, workload, rng);
    if args.trace_json.is_some() {
        engine.viz = Some(VizLogger::default());
        engine.emit_viz_meta();
    }

    match args.until_ticks {
        Some(until) => engine.run_until(SimTime(until)),
        None => engine.run(),
    }

    let trace = engine.viz.take();
    let outcome = engine.into_outcome();
    let flows = FlowStats::derive(&outcome.endpoints, &outcome.completed, &medium);
    let rows = flow_rows(&flows, &outcome.endpoints);

    print!("{}", render_table(&rows));
    println!("{}", summary_line(&outcome.stats));
    println!("done @ tick {}", outcome.end.0);

    if let Some(path) = &args.csv {
        let file = fs::File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        write_csv(file, &rows).map_err(|e| format!("write {}: {e}", path.display()))?;
    }
    if let (Some(path), Some(trace)) = (&args.trace_json, trace) {
        let raw = serde_json::to_string(&trace.events).map_err(|e| e.to_string())?;
        fs::write(path, raw).map_err(|e| format!("write {}: {e}", path.display()))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    // 初始化 tracing；日志写到 stderr，stdout 只放报告
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ethernet-sim: {e}");
            ExitCode::from(2)
        }
    }
}
