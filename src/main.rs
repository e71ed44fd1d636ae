//! Command-line analysis of candle files.
//!
//! Loads `<data-dir>/<symbol>_<timeframe>.json`, optionally detects zones on a
//! higher timeframe, and prints the signal outcome as JSON.

use std::path::PathBuf;

use clap::Parser;
use fxchecklist::config::Config;
use fxchecklist::logging;
use fxchecklist::models::ZoneLedger;
use fxchecklist::services::{JsonFileMarketDataProvider, MarketDataProvider};
use fxchecklist::signals::SignalEngine;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "fxchecklist", about = "Graded entry decisions from OHLCV candle files")]
struct Cli {
    /// Directory holding `<symbol>_<timeframe>.json` candle files
    #[arg(long, env = "DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    #[arg(long)]
    symbol: String,

    /// Timeframe the entry decision is taken on
    #[arg(long, default_value = "H1")]
    timeframe: String,

    /// Higher timeframe scanned for reaction zones
    #[arg(long)]
    htf: Option<String>,

    /// Previously saved zone ledger (JSON); detected zones are appended to it
    #[arg(long)]
    zones: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    logging::init_cli_logging();

    let engine = SignalEngine::new(&config.analysis)?;
    let provider = JsonFileMarketDataProvider::new(cli.data_dir.clone());
    let series = provider.get_series(&cli.symbol, &cli.timeframe)?;

    let mut ledger = match &cli.zones {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => ZoneLedger::new(),
    };

    if let Some(htf) = &cli.htf {
        let htf_series = provider.get_series(&cli.symbol, htf)?;
        let scan = engine.detect_zones(&htf_series, htf, Some((&series, cli.timeframe.as_str())));
        let added = scan.register(&mut ledger);
        info!(symbol = %cli.symbol, zones = added.len(), "zones registered");
    }

    let outcome = engine.evaluate(&series, &cli.timeframe, &ledger);
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
