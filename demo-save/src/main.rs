use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use codec::{decode, encode, encode_pretty, WireLimits};
use demo_schema::{build_demo_level, demo_registry};
use graph::Value;
use registry::registry_hash;
use tools::inspect_document;

#[derive(Parser)]
#[command(
    name = "demo-save",
    version,
    about = "Generate and check gref demo save files"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the demo level and write it as a save document.
    Generate {
        /// Output path for the document text.
        #[arg(long, default_value = "demo-save.json")]
        out: PathBuf,
        /// Emit indented text instead of compact.
        #[arg(long)]
        pretty: bool,
    },
    /// Load a save document with the demo registry and verify it is stable.
    Check {
        /// Path to the document text.
        save_file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate { out, pretty } => generate(&out, pretty),
        Command::Check { save_file } => check(&save_file),
    }
}

fn generate(out: &PathBuf, pretty: bool) -> Result<()> {
    let registry = demo_registry();
    let level = build_demo_level();
    let root = Value::Instance(level);

    let text = if pretty {
        encode_pretty(&registry, &root)
    } else {
        encode(&registry, &root)
    }
    .context("encode demo level")?;

    fs::write(out, &text).with_context(|| format!("write save {}", out.display()))?;

    let report = inspect_document(&text, &WireLimits::default()).context("inspect save")?;
    println!(
        "wrote {} ({} bytes, {} instances, {} refs)",
        out.display(),
        report.document_bytes,
        report.instance_count,
        report.ref_count
    );
    println!("registry hash: 0x{:016x}", registry_hash(&registry));
    Ok(())
}

fn check(save_file: &PathBuf) -> Result<()> {
    let registry = demo_registry();
    let limits = WireLimits::default();

    let text = fs::read_to_string(save_file)
        .with_context(|| format!("read save {}", save_file.display()))?;

    let restored = decode(&registry, &text, &limits).context("decode save")?;

    // A stable save re-encodes to the same document it re-decodes from.
    let reencoded = encode(&registry, &restored).context("re-encode save")?;
    let restored_again = decode(&registry, &reencoded, &limits).context("re-decode save")?;
    let final_text = encode(&registry, &restored_again).context("final encode")?;
    if reencoded != final_text {
        bail!("save is not stable under decode/encode");
    }

    let report = inspect_document(&reencoded, &limits).context("inspect save")?;
    if !report.is_well_formed() {
        bail!(
            "identity lints failed: duplicate ids {:?}, dangling refs {:?}",
            report.duplicate_ids,
            report.dangling_refs
        );
    }

    println!(
        "{}: ok ({} instances, {} refs, max depth {})",
        save_file.display(),
        report.instance_count,
        report.ref_count,
        report.max_depth
    );
    for (type_name, count) in &report.instances_by_type {
        println!("  {type_name}: {count}");
    }
    Ok(())
}
