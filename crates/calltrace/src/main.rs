//! calltrace: hierarchical call-trace demo
//!
//! Runs a two-layer order flow (service calling repository) with every call
//! boundary traced, so the emitted log stream shows the nested arrow diagram
//! end to end. Passing `--item-id ex` makes the repository fail, showing the
//! exceptional-completion path.

mod config;
mod order;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use calltrace_core::{JsonlWriter, LogSink, TraceSink, Tracer};
use config::Config;
use order::OrderService;

/// Hierarchical call-trace demo: run a nested order flow with every call
/// boundary traced
#[derive(Parser)]
#[command(name = "calltrace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Item to order; the value "ex" makes the repository save fail
    #[arg(long, default_value = "item-1")]
    item_id: String,

    /// Path to a TOML config file (default: ./calltrace.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write trace records as JSON lines to this file instead of the log
    #[arg(long)]
    trace_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Pick the sink: an explicit `--trace-file` wins, then the config file,
/// then the default log sink.
fn build_sink(cli: &Cli, config: &Config) -> Result<Arc<dyn TraceSink>> {
    let jsonl_path = cli
        .trace_file
        .clone()
        .or_else(|| config.trace.jsonl_path());

    match jsonl_path {
        Some(path) => Ok(Arc::new(JsonlWriter::new(path)?)),
        None => Ok(Arc::new(LogSink)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let sink = build_sink(&cli, &config)?;
    let tracer = Tracer::with_sink(sink);

    let service = OrderService::new(tracer, config.demo.save_delay_ms);
    service.order(&cli.item_id)?;

    info!("order completed: {}", cli.item_id);
    Ok(())
}
