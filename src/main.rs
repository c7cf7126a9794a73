//! server-select: race mirrors and print the first to answer.
//!
//! ```text
//! server-select race https://a.example.com https://b.example.com
//! server-select --timeout-ms 2000 --json race-all https://a... https://b... https://c...
//! server-select --config mirrors.toml race-all
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::time::Instant;

use server_select::config::{self, ConfigError, SelectConfig};
use server_select::observability::logging;
use server_select::{Endpoint, RaceContext, Racer};

#[derive(Parser)]
#[command(name = "server-select")]
#[command(about = "Race equivalent servers and print the first to respond successfully", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overall race deadline in milliseconds (overrides config).
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Race exactly two endpoints
    Race { a: String, b: String },
    /// Race any number of endpoints (defaults to the configured list)
    RaceAll { urls: Vec<String> },
}

#[derive(Serialize)]
struct WinnerReport<'a> {
    winner: &'a Endpoint,
    elapsed_ms: u128,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => SelectConfig::default(),
    };
    if let Some(ms) = cli.timeout_ms {
        config.race.timeout_ms = ms;
        config::validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability)?;

    tracing::debug!(
        timeout_ms = config.race.timeout_ms,
        success_statuses = ?config.probe.success_statuses,
        "Configuration loaded"
    );

    let racer = Racer::http(&config.probe)?;
    let ctx = RaceContext::with_timeout(config.race.timeout());

    let interrupt = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling race");
            interrupt.cancel();
        }
    });

    let started = Instant::now();
    let result = match cli.command {
        Commands::Race { a, b } => racer.race(&ctx, a, b).await,
        Commands::RaceAll { urls } => {
            let urls = if urls.is_empty() {
                config.endpoints.urls.clone()
            } else {
                urls
            };
            racer.race_all(&ctx, urls).await
        }
    };

    match result {
        Ok(winner) => print_winner(&winner, started.elapsed(), cli.json)?,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_winner(winner: &Endpoint, elapsed: Duration, json: bool) -> Result<(), serde_json::Error> {
    if json {
        let report = WinnerReport {
            winner,
            elapsed_ms: elapsed.as_millis(),
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", winner);
    }
    Ok(())
}
