//! `catena`: find the longest chain for a JSON request.
//!
//! Reads a `LongestChainRequest` from a file or stdin and prints the
//! response as text or JSON.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use catena_harness::{
    logging, render_json, render_text, ChainQueryService, LongestChainRequest, ServiceConfig,
};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "catena")]
#[command(about = "Find the longest chain of linked puzzles within a time limit")]
struct Cli {
    /// Request file (`{"puzzles": [...], "timeout": 60}`); stdin when omitted.
    request: Option<PathBuf>,

    /// TOML service configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Timeout in seconds; overrides the request's own value.
    #[arg(long)]
    timeout: Option<u64>,

    /// Worker threads; overrides the configuration.
    #[arg(long)]
    workers: Option<usize>,

    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Also write the canonical search report to this path.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServiceConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ServiceConfig::default(),
    };
    logging::init(&config.logging.filter);
    if let Some(workers) = cli.workers {
        config.search.workers = workers;
    }

    let raw = match &cli.request {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading request {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading request from stdin")?;
            buf
        }
    };
    let mut request: LongestChainRequest =
        serde_json::from_str(&raw).context("parsing request JSON")?;
    if let Some(seconds) = cli.timeout {
        request = request.with_timeout(seconds);
    }

    let service = ChainQueryService::new(config);
    let outcome = service.execute(&request, None)?;

    if let Some(path) = &cli.report {
        let bytes = outcome
            .report
            .to_canonical_json_bytes()
            .context("serializing search report")?;
        fs::write(path, bytes).with_context(|| format!("writing report {}", path.display()))?;
    }

    let rendered = match cli.format {
        Format::Text => render_text(&outcome.response),
        Format::Json => render_json(&outcome.response)? + "\n",
    };
    io::stdout()
        .write_all(rendered.as_bytes())
        .context("writing response")?;
    Ok(())
}
