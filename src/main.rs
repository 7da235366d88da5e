use anyhow::{Context, Result};
use clap::Parser;
use kaizo_core::engine::config::EngineConfig;
use kaizo_core::logic::board::Side;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod app;
mod input;
mod ui;

/// Play Kaizo Trap against the computer in the terminal.
#[derive(Debug, Parser)]
#[command(name = "kaizo-trap", version, about)]
struct Args {
    /// Search depth in plies, overriding the config file.
    #[arg(long)]
    depth: Option<u8>,

    /// JSON file with engine settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Let the computer make the first move.
    #[arg(long)]
    computer_first: bool,

    /// Mark reachable squares with `o` before each of your moves.
    #[arg(long)]
    hints: bool,

    /// Print the computer's move reports as JSON lines.
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            EngineConfig::load_from_json(&text)
                .with_context(|| format!("loading {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    let config = match args.depth {
        Some(depth) => config.with_depth(depth),
        None => config,
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = Arc::new(load_config(&args)?);
    tracing::debug!(?config, "engine configured");

    let options = app::Options {
        first: if args.computer_first {
            Side::Computer
        } else {
            Side::Human
        },
        hints: args.hints,
        json: args.json,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    app::run(config, options, stdin.lock(), stdout.lock())?;
    Ok(())
}
