use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use codec::{decode, encode};
use demo_schema::demo_registry;
use graph::Value;
use registry::SchemaRegistry;
use savebench::{shared_target_swarm, waypoint_ring, wide_level};
use serde::Serialize;
use wire::Limits;

#[derive(Parser)]
#[command(
    name = "savebench",
    version,
    about = "gref save benchmark harness"
)]
struct Cli {
    /// Terrain slabs in the wide-level scenario.
    #[arg(long, default_value_t = 256)]
    slabs: usize,
    /// Enemies in the shared-target scenario.
    #[arg(long, default_value_t = 128)]
    enemies: usize,
    /// Waypoints in the ring scenario.
    #[arg(long, default_value_t = 96)]
    ring: usize,
    /// Iterations per scenario.
    #[arg(long, default_value_t = 50)]
    iterations: u32,
    /// Output directory for summary.json.
    #[arg(long, default_value = "target/savebench")]
    out_dir: PathBuf,
}

#[derive(Serialize)]
struct Summary {
    iterations: u32,
    scenarios: Vec<ScenarioResult>,
}

#[derive(Serialize)]
struct ScenarioResult {
    name: String,
    document_bytes: usize,
    encode_micros_avg: u128,
    decode_micros_avg: u128,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let registry = demo_registry();

    let scenarios = vec![
        (
            format!("wide_level_{}", cli.slabs),
            Value::Instance(wide_level(cli.slabs)),
        ),
        (
            format!("shared_target_swarm_{}", cli.enemies),
            Value::Instance(shared_target_swarm(cli.enemies)),
        ),
        (
            format!("waypoint_ring_{}", cli.ring),
            Value::Instance(waypoint_ring(cli.ring)),
        ),
    ];

    let mut summary = Summary {
        iterations: cli.iterations,
        scenarios: Vec::new(),
    };

    for (name, root) in &scenarios {
        let result = measure(&registry, name, root, cli.iterations)?;
        println!(
            "{}: {} bytes, encode {}us, decode {}us",
            result.name,
            result.document_bytes,
            result.encode_micros_avg,
            result.decode_micros_avg
        );
        summary.scenarios.push(result);
    }

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create output dir {}", cli.out_dir.display()))?;
    let summary_path = cli.out_dir.join("summary.json");
    let json = serde_json::to_string_pretty(&summary).context("serialize summary")?;
    fs::write(&summary_path, json)
        .with_context(|| format!("write summary {}", summary_path.display()))?;
    println!("wrote {}", summary_path.display());
    Ok(())
}

fn measure(
    registry: &SchemaRegistry,
    name: &str,
    root: &Value,
    iterations: u32,
) -> Result<ScenarioResult> {
    // Rings nest one level per hop, so decoding measures with no depth cap.
    let limits = Limits::unlimited();

    let text = encode(registry, root).context("encode scenario")?;

    let started = Instant::now();
    for _ in 0..iterations {
        let _ = encode(registry, root).context("encode scenario")?;
    }
    let encode_micros_avg = started.elapsed().as_micros() / u128::from(iterations.max(1));

    let started = Instant::now();
    for _ in 0..iterations {
        let _ = decode(registry, &text, &limits).context("decode scenario")?;
    }
    let decode_micros_avg = started.elapsed().as_micros() / u128::from(iterations.max(1));

    Ok(ScenarioResult {
        name: name.to_owned(),
        document_bytes: text.len(),
        encode_micros_avg,
        decode_micros_avg,
    })
}
