use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Absolute open/close distance
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Signed open-to-close move, positive for bullish bars
    pub fn net_move(&self) -> f64 {
        self.close - self.open
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn upper_wick(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn lower_wick(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    /// Close location inside the bar, 0.0 at the low and 1.0 at the high.
    /// `None` for a zero-range bar.
    pub fn close_location(&self) -> Option<f64> {
        let range = self.range();
        if range <= 0.0 {
            return None;
        }
        Some((self.close - self.low) / range)
    }

    /// True when the bar's high/low range intersects `[low, high]`
    pub fn overlaps(&self, low: f64, high: f64) -> bool {
        self.low <= high && self.high >= low
    }
}

/// A chronologically ordered, non-empty run of candles.
///
/// Construction validates the input; every analysis stage can rely on
/// strictly increasing timestamps and finite OHLCV values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Candle>", into = "Vec<Candle>")]
pub struct Series {
    candles: Vec<Candle>,
}

impl Series {
    pub fn new(candles: Vec<Candle>) -> Result<Self, EngineError> {
        validate_candles(&candles)?;
        Ok(Self { candles })
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// The most recent candle. A series is never empty.
    pub fn latest(&self) -> &Candle {
        &self.candles[self.candles.len() - 1]
    }
}

impl Deref for Series {
    type Target = [Candle];

    fn deref(&self) -> &Self::Target {
        &self.candles
    }
}

impl TryFrom<Vec<Candle>> for Series {
    type Error = EngineError;

    fn try_from(candles: Vec<Candle>) -> Result<Self, Self::Error> {
        Series::new(candles)
    }
}

impl From<Series> for Vec<Candle> {
    fn from(series: Series) -> Self {
        series.candles
    }
}

/// Validate a candle sequence against the series invariants.
pub fn validate_candles(candles: &[Candle]) -> Result<(), EngineError> {
    if candles.is_empty() {
        return Err(EngineError::EmptySeries);
    }

    for (index, candle) in candles.iter().enumerate() {
        let fields = [
            ("open", candle.open),
            ("high", candle.high),
            ("low", candle.low),
            ("close", candle.close),
            ("volume", candle.volume),
        ];
        if let Some(&(field, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(EngineError::NonFiniteValue { index, field });
        }

        if candle.volume < 0.0 {
            return Err(EngineError::InvalidCandle {
                index,
                reason: format!("negative volume {}", candle.volume),
            });
        }

        if candle.low > candle.high
            || candle.low > candle.open.min(candle.close)
            || candle.high < candle.open.max(candle.close)
        {
            return Err(EngineError::InvalidCandle {
                index,
                reason: format!(
                    "low={}, high={}, open={}, close={}",
                    candle.low, candle.high, candle.open, candle.close
                ),
            });
        }

        if index > 0 && candle.timestamp <= candles[index - 1].timestamp {
            return Err(EngineError::NonMonotonicTimestamp { index });
        }
    }

    Ok(())
}
