//! Runtime configuration: environment, server port and analysis options.

use std::env;
use std::str::FromStr;

use crate::error::{ensure_factor, ensure_period, EngineError};
use crate::indicators::{AoiParams, SwingDetector, TrendParams};

/// Numeric options of every pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    pub pivot_window: usize,
    pub trend: TrendParams,
    pub aoi: AoiParams,
    pub volume_lookback: usize,
    pub pip_size: f64,
    /// Distance in pips at which a round-number level counts as a key level
    pub psych_radius_pips: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pivot_window: SwingDetector::DEFAULT_WINDOW,
            trend: TrendParams::default(),
            aoi: AoiParams::default(),
            volume_lookback: 20,
            pip_size: 0.0001,
            psych_radius_pips: 15.0,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        ensure_period("pivot_window", self.pivot_window)?;
        self.trend.validate()?;
        ensure_factor("expansion_ratio", self.aoi.expansion_ratio)?;
        ensure_factor("consolidation_ratio", self.aoi.consolidation_ratio)?;
        ensure_period("volume_lookback", self.volume_lookback)?;
        ensure_factor("psych_radius_pips", self.psych_radius_pips)?;
        if !(self.pip_size.is_finite() && self.pip_size > 0.0) {
            return Err(EngineError::config("pip_size", "must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub analysis: AnalysisConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: 8080,
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment (and `.env`, if present).
    ///
    /// Unset variables keep their defaults; unparsable or out-of-range values
    /// are rejected.
    pub fn from_env() -> Result<Self, EngineError> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();
        let mut analysis = defaults.analysis;
        analysis.pivot_window = env_or("PIVOT_WINDOW", analysis.pivot_window)?;
        analysis.trend.ema_period = env_or("EMA_PERIOD", analysis.trend.ema_period)?;
        analysis.trend.volatility_period =
            env_or("VOLATILITY_PERIOD", analysis.trend.volatility_period)?;
        analysis.volume_lookback = env_or("VOLUME_LOOKBACK", analysis.volume_lookback)?;
        analysis.pip_size = env_or("PIP_SIZE", analysis.pip_size)?;
        analysis.validate()?;

        Ok(Self {
            environment: get_environment(),
            port: env_or("PORT", defaults.port)?,
            analysis,
        })
    }
}

/// Deployment environment from `APP_ENV`, `sandbox` when unset
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, EngineError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| EngineError::config(key, format!("cannot parse {raw:?}"))),
        Err(_) => Ok(default),
    }
}
