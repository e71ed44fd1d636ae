//! Engine error types.

use thiserror::Error;

/// Errors raised at the edges of the engine: input validation and configuration.
///
/// "Not enough data" and "no signal" are never errors; they are result variants
/// of the individual analysis stages.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// A series must contain at least one candle
    #[error("series is empty")]
    EmptySeries,

    /// Timestamps must be strictly increasing
    #[error("non-monotonic timestamp at index {index}")]
    NonMonotonicTimestamp {
        /// Index of the offending candle.
        index: usize,
    },

    /// NaN or infinite price/volume
    #[error("non-finite {field} at index {index}")]
    NonFiniteValue {
        /// Index of the offending candle.
        index: usize,
        /// Name of the offending field.
        field: &'static str,
    },

    /// OHLC values that cannot describe a real bar
    #[error("invalid candle at index {index}: {reason}")]
    InvalidCandle {
        /// Index of the offending candle.
        index: usize,
        /// Human readable description.
        reason: String,
    },

    /// Zone band that is inverted or not finite
    #[error("invalid zone at index {index}: {reason}")]
    InvalidZone {
        /// Position of the zone in the ledger.
        index: usize,
        /// Human readable description.
        reason: String,
    },

    /// Out-of-range period, factor, weight or threshold
    #[error("invalid configuration: {param} {reason}")]
    InvalidConfiguration {
        /// Parameter name.
        param: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Failure reported by a market data provider
    #[error("market data provider error: {0}")]
    Provider(String),
}

impl EngineError {
    pub(crate) fn config(param: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidConfiguration {
            param: param.into(),
            reason: reason.into(),
        }
    }
}

/// Largest accepted period, window or lookback
pub const MAX_PERIOD: usize = 100_000;

/// Fail with `InvalidConfiguration` unless `1 <= value <= MAX_PERIOD`.
pub(crate) fn ensure_period(param: &str, value: usize) -> Result<(), EngineError> {
    if value == 0 {
        return Err(EngineError::config(param, "must be at least 1"));
    }
    if value > MAX_PERIOD {
        return Err(EngineError::config(
            param,
            format!("must be at most {MAX_PERIOD}, got {value}"),
        ));
    }
    Ok(())
}

/// Fail with `InvalidConfiguration` unless `value` is finite and non-negative.
pub(crate) fn ensure_factor(param: &str, value: f64) -> Result<(), EngineError> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::config(
            param,
            format!("must be a finite non-negative number, got {value}"),
        ));
    }
    Ok(())
}
