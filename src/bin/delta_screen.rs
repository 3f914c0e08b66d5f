//! Call delta screener CLI
//!
//! Prints the current price, the chosen expiration and the filtered call
//! table for one ticker.
//!
//! ```bash
//! delta-screen COST
//! delta-screen COST --tolerance 5 --weeks 6 --json
//! delta-screen COST --snapshot data/sample_cost.json --expiration 2026-11-13
//! RUST_LOG=info delta-screen COST
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use call_delta_screener::prelude::*;

/// Screen near-the-money calls and estimate Black-Scholes delta
#[derive(Parser)]
#[command(name = "delta-screen")]
#[command(version)]
struct Cli {
    /// Ticker symbol of the underlying
    #[arg(default_value = "COST")]
    symbol: String,

    /// JSON file with screen settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Half-width of the strike band in currency units
    #[arg(long)]
    tolerance: Option<f64>,

    /// Strike target as a fraction of spot (0.95 = 5% below)
    #[arg(long)]
    offset: Option<f64>,

    /// Expiration horizon in weeks
    #[arg(long)]
    weeks: Option<u32>,

    /// Annualized risk-free rate
    #[arg(long)]
    rate: Option<f64>,

    /// Use this expiration (YYYY-MM-DD) instead of the nearest to the horizon
    #[arg(long)]
    expiration: Option<String>,

    /// Read market data from a JSON snapshot instead of Yahoo Finance
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn screen_config(&self) -> ScreenResult<ScreenConfig> {
        let mut config = match &self.config {
            Some(path) => ScreenConfig::from_json_file(path)?,
            None => ScreenConfig::default(),
        };

        if let Some(tolerance) = self.tolerance {
            config.strike_tolerance = tolerance;
        }
        if let Some(offset) = self.offset {
            config.strike_offset = offset;
        }
        if let Some(weeks) = self.weeks {
            config.weeks_to_expiry = weeks;
        }
        if let Some(rate) = self.rate {
            config.risk_free_rate = rate;
        }
        if let Some(expiration) = &self.expiration {
            config.expiration = Some(parse_expiration(expiration)?);
        }

        config.validate()?;
        Ok(config)
    }

    fn provider(&self) -> ScreenResult<Box<dyn MarketDataProvider>> {
        Ok(match &self.snapshot {
            Some(path) => Box::new(SnapshotProvider::from_json_file(path)?),
            None => Box::new(YahooClient::new(Duration::from_secs(self.timeout_secs))?),
        })
    }
}

fn run(cli: &Cli) -> ScreenResult<()> {
    let config = cli.screen_config()?;
    let provider = cli.provider()?;
    let today = chrono::Local::now().date_naive();
    let symbol = cli.symbol.to_uppercase();

    let report = run_screen(provider.as_ref(), &symbol, &config, today)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Screen failed for {}: {}", cli.symbol, e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
