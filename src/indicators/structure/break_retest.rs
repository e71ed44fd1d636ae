//! Break-and-retest validation of the latest structure break

use serde::{Deserialize, Serialize};

use crate::error::{ensure_factor, ensure_period, EngineError};
use crate::indicators::structure::swings::SwingDetector;
use crate::indicators::volatility::atr;
use crate::models::{Candle, StructureBias, SwingKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetestStatus {
    Confirmed,
    Pending,
    Invalid,
}

/// Judges whether price broke a structure level and came back to retest it.
///
/// The entry engine only depends on this contract; implementations are free to
/// use any notion of "level".
pub trait BreakRetestValidator: Send + Sync {
    fn validate(&self, candles: &[Candle], bias: StructureBias) -> RetestStatus;
}

/// Uses the most recent broken swing as the level.
///
/// Bullish: the latest swing high that a later close exceeded. A later close
/// back below `level - tolerance` invalidates the break; a later low back within
/// `tolerance` of the level confirms the retest. Bearish mirrors this on swing
/// lows. `Transition` and `Range` have nothing to retest and are invalid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingRetestValidator {
    detector: SwingDetector,
    volatility_period: usize,
    tolerance_factor: f64,
}

impl SwingRetestValidator {
    pub fn new(
        detector: SwingDetector,
        volatility_period: usize,
        tolerance_factor: f64,
    ) -> Result<Self, EngineError> {
        ensure_period("volatility_period", volatility_period)?;
        ensure_factor("retest_tolerance_factor", tolerance_factor)?;
        Ok(Self {
            detector,
            volatility_period,
            tolerance_factor,
        })
    }

    fn tolerance(&self, candles: &[Candle]) -> f64 {
        atr::calculate_atr(candles, self.volatility_period)
            .map(|volatility| volatility * self.tolerance_factor)
            .unwrap_or(0.0)
    }
}

impl Default for SwingRetestValidator {
    fn default() -> Self {
        Self {
            detector: SwingDetector::default(),
            volatility_period: 14,
            tolerance_factor: 0.2,
        }
    }
}

impl BreakRetestValidator for SwingRetestValidator {
    fn validate(&self, candles: &[Candle], bias: StructureBias) -> RetestStatus {
        let (kind, bullish) = match bias {
            StructureBias::Bullish => (SwingKind::High, true),
            StructureBias::Bearish => (SwingKind::Low, false),
            StructureBias::Transition | StructureBias::Range => return RetestStatus::Invalid,
        };

        let swings = self.detector.detect(candles);
        let tolerance = self.tolerance(candles);

        let broke = |candle: &Candle, level: f64| {
            if bullish {
                candle.close > level
            } else {
                candle.close < level
            }
        };

        for swing in swings.iter().rev().filter(|s| s.kind == kind) {
            let level = swing.price;
            let Some(offset) = candles[swing.index + 1..]
                .iter()
                .position(|c| broke(c, level))
            else {
                continue;
            };
            let after = &candles[swing.index + 1 + offset + 1..];

            let failed = after.iter().any(|c| {
                if bullish {
                    c.close < level - tolerance
                } else {
                    c.close > level + tolerance
                }
            });
            if failed {
                return RetestStatus::Invalid;
            }

            let retested = after.iter().any(|c| {
                if bullish {
                    c.low <= level + tolerance
                } else {
                    c.high >= level - tolerance
                }
            });
            return if retested {
                RetestStatus::Confirmed
            } else {
                RetestStatus::Pending
            };
        }

        RetestStatus::Pending
    }
}
