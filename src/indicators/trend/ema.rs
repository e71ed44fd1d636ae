//! EMA trend engine: moving average, volatility-normalised slope, price
//! position and rejection off the average

use tracing::debug;

use crate::common::math;
use crate::error::{ensure_factor, ensure_period, EngineError, MAX_PERIOD};
use crate::indicators::volatility::atr;
use crate::models::{
    Candle, MarketBias, PricePosition, Rejection, Slope, TrendReading, TrendState,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendParams {
    pub ema_period: usize,
    pub volatility_period: usize,
    pub slope_lookback: usize,
    /// Normalised slope beyond which the average is Up/Down
    pub slope_factor: f64,
    /// Fraction of volatility around the average treated as "on zone"
    pub zone_buffer_factor: f64,
    /// Minimum wick/body ratio for a rejection off the average
    pub rejection_wick_ratio: f64,
    /// Bars required on top of `ema_period`
    pub history_padding: usize,
}

impl Default for TrendParams {
    fn default() -> Self {
        Self {
            ema_period: 50,
            volatility_period: 14,
            slope_lookback: 3,
            slope_factor: 0.15,
            zone_buffer_factor: 0.2,
            rejection_wick_ratio: 1.2,
            history_padding: 20,
        }
    }
}

impl TrendParams {
    pub fn validate(&self) -> Result<(), EngineError> {
        ensure_period("ema_period", self.ema_period)?;
        ensure_period("volatility_period", self.volatility_period)?;
        ensure_period("slope_lookback", self.slope_lookback)?;
        if self.history_padding > MAX_PERIOD {
            return Err(EngineError::config(
                "history_padding",
                format!("must be at most {MAX_PERIOD}"),
            ));
        }
        ensure_factor("slope_factor", self.slope_factor)?;
        ensure_factor("zone_buffer_factor", self.zone_buffer_factor)?;
        ensure_factor("rejection_wick_ratio", self.rejection_wick_ratio)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendEngine {
    params: TrendParams,
}

impl TrendEngine {
    pub fn new(params: TrendParams) -> Result<Self, EngineError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &TrendParams {
        &self.params
    }

    /// Minimum number of candles for a valid reading
    pub fn required_history(&self) -> usize {
        self.params
            .ema_period
            .saturating_add(self.params.history_padding)
            .max(self.params.volatility_period)
    }

    /// Analyse the latest bar. `bias` filters rejections against the structure.
    pub fn analyze(&self, candles: &[Candle], bias: MarketBias) -> TrendReading {
        let required = self.required_history();
        if candles.len() < required {
            debug!(
                required,
                actual = candles.len(),
                "trend engine: insufficient history"
            );
            return TrendReading::Invalid {
                required,
                actual: candles.len(),
            };
        }

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let ema = math::ema_series(&closes, self.params.ema_period);
        let volatility = atr::volatility_series(candles, self.params.volatility_period)
            .last()
            .copied()
            .flatten();

        let slope = detect_slope(
            &ema,
            volatility,
            self.params.slope_lookback,
            self.params.slope_factor,
        );
        let buffer = volatility.unwrap_or(0.0) * self.params.zone_buffer_factor;
        let position = detect_position(candles, &ema, buffer);

        let latest = &candles[candles.len() - 1];
        let value = ema[ema.len() - 1];
        let rejection = detect_rejection(
            latest,
            value,
            slope,
            bias,
            self.params.rejection_wick_ratio,
        );

        let volatility = volatility.unwrap_or(0.0);
        let distance = if volatility > 0.0 {
            (latest.close - value) / volatility
        } else {
            0.0
        };

        debug!(
            ema = value,
            volatility,
            slope = slope.as_str(),
            position = position.as_str(),
            rejection = rejection.as_str(),
            "trend engine reading"
        );

        TrendReading::Valid(TrendState {
            value,
            price: latest.close,
            volatility,
            slope,
            position,
            rejection,
            distance,
        })
    }
}

impl Default for TrendEngine {
    fn default() -> Self {
        Self {
            params: TrendParams::default(),
        }
    }
}

/// Slope of the average over `lookback` bars, in volatility units.
///
/// Flat when fewer than `lookback + 1` points exist or volatility is missing
/// or zero.
pub fn detect_slope(ema: &[f64], volatility: Option<f64>, lookback: usize, factor: f64) -> Slope {
    let Some(volatility) = volatility.filter(|v| *v > 0.0) else {
        return Slope::Flat;
    };
    if ema.len() < lookback + 1 {
        return Slope::Flat;
    }

    let last = ema.len() - 1;
    let normalized = (ema[last] - ema[last - lookback]) / volatility;

    if normalized > factor {
        Slope::Up
    } else if normalized < -factor {
        Slope::Down
    } else {
        Slope::Flat
    }
}

/// Latest close versus the average. The buffer check wins over crosses.
pub fn detect_position(candles: &[Candle], ema: &[f64], buffer: f64) -> PricePosition {
    let n = candles.len().min(ema.len());
    if n == 0 {
        return PricePosition::OnZone;
    }

    let close_now = candles[n - 1].close;
    let ema_now = ema[n - 1];

    if (close_now - ema_now).abs() <= buffer {
        return PricePosition::OnZone;
    }

    if n >= 2 {
        let close_prev = candles[n - 2].close;
        let ema_prev = ema[n - 2];
        if close_prev < ema_prev && close_now > ema_now {
            return PricePosition::CrossUp;
        }
        if close_prev > ema_prev && close_now < ema_now {
            return PricePosition::CrossDown;
        }
    }

    if close_now > ema_now {
        PricePosition::Above
    } else {
        PricePosition::Below
    }
}

/// Rejection of the average as dynamic support or resistance on `candle`.
pub fn detect_rejection(
    candle: &Candle,
    ema_value: f64,
    slope: Slope,
    bias: MarketBias,
    wick_ratio: f64,
) -> Rejection {
    let body = candle.body();

    if candle.low <= ema_value
        && candle.close > ema_value
        && candle.lower_wick() > body * wick_ratio
        && slope != Slope::Down
        && bias != MarketBias::Bearish
    {
        return Rejection::BullishRejection;
    }

    if candle.high >= ema_value
        && candle.close < ema_value
        && candle.upper_wick() > body * wick_ratio
        && slope != Slope::Up
        && bias != MarketBias::Bullish
    {
        return Rejection::BearishRejection;
    }

    Rejection::None
}
