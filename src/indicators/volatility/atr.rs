//! Mean true range, the volatility unit used to normalise slope and buffers

use crate::common::math;
use crate::models::Candle;

/// Per-bar true range. The first bar has no previous close and uses high - low.
pub fn true_range_series(candles: &[Candle]) -> Vec<f64> {
    candles
        .iter()
        .enumerate()
        .map(|(i, candle)| {
            let prev_close = i.checked_sub(1).map(|p| candles[p].close);
            math::true_range(candle.high, candle.low, prev_close)
        })
        .collect()
}

/// Rolling simple mean of the true range, aligned with `candles`.
///
/// Entries before the first full window are `None`.
pub fn volatility_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    math::rolling_mean(&true_range_series(candles), period)
}

/// Volatility at the latest bar
pub fn calculate_atr(candles: &[Candle], period: usize) -> Option<f64> {
    volatility_series(candles, period).last().copied().flatten()
}
