//! Entry candle patterns on the latest bar

use serde::{Deserialize, Serialize};

use crate::error::{ensure_factor, EngineError};
use crate::models::Candle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySignal {
    BullishRejection,
    BearishRejection,
    BullishMomentum,
    BearishMomentum,
}

impl EntrySignal {
    pub fn is_momentum(&self) -> bool {
        matches!(self, EntrySignal::BullishMomentum | EntrySignal::BearishMomentum)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntrySignal::BullishRejection => "bullish_rejection",
            EntrySignal::BearishRejection => "bearish_rejection",
            EntrySignal::BullishMomentum => "bullish_momentum",
            EntrySignal::BearishMomentum => "bearish_momentum",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryCandleParams {
    /// Rejection wick must exceed this multiple of the body
    pub rejection_wick_ratio: f64,
    /// Close must sit in this outer fraction of the range on the trend side
    pub close_zone: f64,
    /// Momentum body must exceed this fraction of the range
    pub momentum_body_ratio: f64,
}

impl Default for EntryCandleParams {
    fn default() -> Self {
        Self {
            rejection_wick_ratio: 1.3,
            close_zone: 0.4,
            momentum_body_ratio: 0.65,
        }
    }
}

impl EntryCandleParams {
    pub fn validate(&self) -> Result<(), EngineError> {
        ensure_factor("rejection_wick_ratio", self.rejection_wick_ratio)?;
        ensure_factor("close_zone", self.close_zone)?;
        ensure_factor("momentum_body_ratio", self.momentum_body_ratio)?;
        if self.close_zone > 1.0 || self.momentum_body_ratio > 1.0 {
            return Err(EngineError::config(
                "entry_candle",
                "close_zone and momentum_body_ratio must not exceed 1.0",
            ));
        }
        Ok(())
    }
}

/// Look for an entry pattern on the latest bar.
///
/// At a key level only a rejection qualifies: a trend-coloured bar with the
/// opposite wick longer than `rejection_wick_ratio` bodies and the close in
/// the outer `close_zone` of the range. Elsewhere only momentum qualifies: a
/// body above `momentum_body_ratio` of the range closing beyond the previous
/// bar's extreme.
pub fn detect_entry_candle(
    candles: &[Candle],
    direction: Direction,
    at_key_level: bool,
    params: &EntryCandleParams,
) -> Option<EntrySignal> {
    let [.., prev, candle] = candles else {
        return None;
    };

    let close_location = candle.close_location()?;
    let body = candle.body();

    if at_key_level {
        return match direction {
            Direction::Bullish
                if candle.is_bullish()
                    && candle.lower_wick() > body * params.rejection_wick_ratio
                    && close_location > 1.0 - params.close_zone =>
            {
                Some(EntrySignal::BullishRejection)
            }
            Direction::Bearish
                if candle.is_bearish()
                    && candle.upper_wick() > body * params.rejection_wick_ratio
                    && close_location < params.close_zone =>
            {
                Some(EntrySignal::BearishRejection)
            }
            Direction::Bullish | Direction::Bearish => None,
        };
    }

    if body <= candle.range() * params.momentum_body_ratio {
        return None;
    }

    match direction {
        Direction::Bullish if candle.close > prev.high => Some(EntrySignal::BullishMomentum),
        Direction::Bearish if candle.close < prev.low => Some(EntrySignal::BearishMomentum),
        Direction::Bullish | Direction::Bearish => None,
    }
}
