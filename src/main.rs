//! GBO MCP Server - Main Entry Point
//!
//! This is the main entry point for the GBO MCP server application.
//! The actual implementation is in the `gbo_mcp` library.

use anyhow::{Result, anyhow};
use clap::Parser;
use gbo_mcp::gbo::LineEvent;
use gbo_mcp::{Config, GboServerHandler, LineState, TimeUnit, exchange};
use mcp_attr::server::serve_stdio;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. "debug", "gbo_mcp=trace")
const LOG_ENV: &str = "GBO_LOG";

/// GBO MCP Server - line balancing and Takt Time analysis via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Display unit for operation times (minutes/seconds), overrides the config file
    #[arg(long)]
    display_unit: Option<TimeUnit>,

    /// CSV file with operations to load at startup
    #[arg(long)]
    import: Option<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the MCP protocol, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn initial_state(config: &Config, import: Option<&PathBuf>) -> Result<LineState> {
    let state = LineState::new(config.display_unit, config.demand_unit.clone());
    let Some(path) = import else {
        return Ok(state);
    };

    let operations = exchange::import_operations(path)?;
    state
        .apply(LineEvent::ReplaceOperations(operations))
        .map_err(|e| anyhow!("Failed to load '{}': {}", path.display(), e))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    let mut config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(unit) = args.display_unit {
        config.display_unit = unit;
    }

    let state = initial_state(&config, args.import.as_ref())?;
    tracing::info!(
        display_unit = %config.display_unit,
        operations = state.operations().len(),
        "starting GBO MCP server on stdio"
    );

    let handler = GboServerHandler::with_state(config, state);
    serve_stdio(handler).await?;
    Ok(())
}
