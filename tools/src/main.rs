use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::Pattern;
use tools::{format_report_pretty, inspect_document, normalize_document, DocumentReport};

#[derive(Parser)]
#[command(
    name = "gref-tools",
    version,
    about = "gref save-document inspection tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect document structure, identities, and lints.
    Inspect {
        /// Path to the document text, or a directory of documents.
        document_path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected documents.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected documents (after sorting).
        #[arg(long)]
        limit: Option<usize>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Re-emit a document in normalized, indented form.
    Show {
        /// Path to the document text.
        document_file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Inspect {
            document_path,
            glob,
            sort,
            limit,
            format,
        } => {
            if document_path.is_dir() {
                let entries = collect_document_entries(&document_path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    let report = inspect_path(&entry.path)?;
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    print_report(&report, format)?;
                }
            } else {
                let report = inspect_path(&document_path)?;
                print_report(&report, format)?;
            }
        }
        Command::Show { document_file } => {
            let text = fs::read_to_string(&document_file)
                .with_context(|| format!("read document {}", document_file.display()))?;
            let normalized = normalize_document(&text, &wire::Limits::default())
                .context("normalize document")?;
            println!("{normalized}");
        }
    }
    Ok(())
}

fn inspect_path(path: &PathBuf) -> Result<DocumentReport> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read document {}", path.display()))?;
    inspect_document(&text, &wire::Limits::default())
        .with_context(|| format!("inspect document {}", path.display()))
}

fn print_report(report: &DocumentReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("serialize json")?;
            println!("{json}");
        }
        OutputFormat::Pretty => {
            print!("{}", format_report_pretty(report));
        }
    }
    Ok(())
}

struct DocumentEntry {
    path: PathBuf,
    size: u64,
}

fn collect_document_entries(dir: &PathBuf, glob: Option<&str>) -> Result<Vec<DocumentEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(DocumentEntry { path, size });
    }
    Ok(entries)
}

fn maybe_sort_entries(
    mut entries: Vec<DocumentEntry>,
    sort: Option<InspectSort>,
) -> Vec<DocumentEntry> {
    match sort {
        Some(InspectSort::Size) => {
            entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        }
        None => {}
    }
    entries
}
