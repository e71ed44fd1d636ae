//! EMA quality scoring: turns a trend reading into a weighted score.
//!
//! Used for higher-timeframe confluence, not as an entry trigger.

use crate::error::EngineError;
use crate::models::{
    Confidence, MarketBias, PricePosition, Rejection, ScoreResult, Slope, TrendReading,
};
use crate::signals::weights::EmaWeights;

pub const TREND_INVALID: &str = "trend_invalid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmaScorer {
    weights: EmaWeights,
}

impl EmaScorer {
    pub fn new(weights: EmaWeights) -> Result<Self, EngineError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &EmaWeights {
        &self.weights
    }

    /// Score a reading against the structure bias. `in_zone` adds the
    /// reaction-zone bonus.
    pub fn score(&self, reading: &TrendReading, bias: MarketBias, in_zone: bool) -> ScoreResult {
        let Some(state) = reading.state() else {
            return ScoreResult {
                score: 0,
                confidence: Confidence::Weak,
                reasons: vec![TREND_INVALID],
            };
        };

        let w = &self.weights;
        let mut score = 0;
        let mut reasons = Vec::new();

        let (points, tag) = match state.slope {
            Slope::Up => (w.slope_up, "ema_slope_up"),
            Slope::Down => (w.slope_down, "ema_slope_down"),
            Slope::Flat => (w.flat_penalty, "ema_flat"),
        };
        score += points;
        reasons.push(tag);

        match state.position {
            PricePosition::Above => {
                score += w.price_above;
                reasons.push("price_above_ema");
            }
            PricePosition::Below => {
                score += w.price_below;
                reasons.push("price_below_ema");
            }
            PricePosition::CrossUp | PricePosition::CrossDown | PricePosition::OnZone => {}
        }

        match state.rejection {
            Rejection::BullishRejection | Rejection::BearishRejection => {
                score += w.rejection;
                reasons.push(state.rejection.as_str());
            }
            Rejection::None => {}
        }

        let (points, tag) = match (bias, state.slope) {
            (MarketBias::Bullish, Slope::Up) => {
                (w.structure_alignment, "ema_aligned_with_bull_structure")
            }
            (MarketBias::Bearish, Slope::Down) => {
                (w.structure_alignment, "ema_aligned_with_bear_structure")
            }
            (MarketBias::Transition | MarketBias::Range, _) => {
                (w.range_penalty, "structure_not_clean")
            }
            (MarketBias::Bullish | MarketBias::Bearish, _) => {
                (w.structure_conflict, "ema_structure_conflict")
            }
        };
        score += points;
        reasons.push(tag);

        if in_zone {
            score += w.inside_zone;
            reasons.push("ema_inside_htf_aoi");
        }

        ScoreResult {
            score,
            confidence: w.thresholds.confidence(score),
            reasons,
        }
    }
}
