//! Market data provider interface.
//!
//! Connectivity, retries and caching belong to the provider; the pipeline only
//! ever sees a validated [`Series`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::EngineError;
use crate::models::Series;

pub trait MarketDataProvider: Send + Sync {
    /// Time-ordered candles for a symbol on one timeframe
    fn get_series(&self, symbol: &str, timeframe: &str) -> Result<Series, EngineError>;
}

/// Series held in memory, keyed by symbol and timeframe
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketDataProvider {
    series: HashMap<(String, String), Series>,
}

impl InMemoryMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: &str, timeframe: &str, series: Series) {
        self.series
            .insert((symbol.to_string(), timeframe.to_string()), series);
    }
}

impl MarketDataProvider for InMemoryMarketDataProvider {
    fn get_series(&self, symbol: &str, timeframe: &str) -> Result<Series, EngineError> {
        self.series
            .get(&(symbol.to_string(), timeframe.to_string()))
            .cloned()
            .ok_or_else(|| EngineError::Provider(format!("no data for {symbol} {timeframe}")))
    }
}

/// Reads `<root>/<symbol>_<timeframe>.json`, a JSON array of candles.
#[derive(Debug, Clone)]
pub struct JsonFileMarketDataProvider {
    root: PathBuf,
}

impl JsonFileMarketDataProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, symbol: &str, timeframe: &str) -> PathBuf {
        self.root.join(format!("{symbol}_{timeframe}.json"))
    }

    /// Load a single candle file outside the naming scheme
    pub fn load(path: &Path) -> Result<Series, EngineError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| EngineError::Provider(format!("{}: {e}", path.display())))?;
        let series: Series = serde_json::from_str(&raw)
            .map_err(|e| EngineError::Provider(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), candles = series.len(), "series loaded");
        Ok(series)
    }
}

impl MarketDataProvider for JsonFileMarketDataProvider {
    fn get_series(&self, symbol: &str, timeframe: &str) -> Result<Series, EngineError> {
        Self::load(&self.path_for(symbol, timeframe))
    }
}
