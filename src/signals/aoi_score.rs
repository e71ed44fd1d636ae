//! AOI quality scoring: freshness, reactions, source and structure alignment.

use crate::error::EngineError;
use crate::models::{
    AoiKind, AoiSource, MarketBias, ReactionStrength, Rejection, ScoreResult, ZoneView,
};
use crate::signals::weights::AoiWeights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AoiScorer {
    weights: AoiWeights,
}

impl AoiScorer {
    pub fn new(weights: AoiWeights) -> Result<Self, EngineError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &AoiWeights {
        &self.weights
    }

    /// Score one zone. The zone's touch/reaction history is only read.
    /// `rejection` is the moving-average rejection seen inside the zone, if any.
    pub fn score(
        &self,
        zone: ZoneView<'_>,
        bias: MarketBias,
        rejection: Option<Rejection>,
    ) -> ScoreResult {
        let w = &self.weights;
        let mut score = 0;
        let mut reasons = Vec::new();

        let (points, tag) = match zone.touches {
            0 => (w.fresh_zone, "fresh_aoi"),
            1 => (w.tested_once, "aoi_tested_once"),
            _ => (w.over_tested, "aoi_over_tested"),
        };
        score += points;
        reasons.push(tag);

        if !zone.reactions.is_empty() {
            let strong = zone
                .reactions
                .iter()
                .any(|r| r.strength == ReactionStrength::Strong);
            if strong {
                score += w.strong_reaction;
                reasons.push("strong_reaction_from_aoi");
            } else {
                score += w.weak_reaction;
                reasons.push("weak_reaction_from_aoi");
            }
        }

        let (points, tag) = match zone.zone.source {
            AoiSource::Htf => (w.htf_bonus, "htf_aoi"),
            AoiSource::Ltf => (w.ltf_bonus, "ltf_aoi"),
        };
        score += points;
        reasons.push(tag);

        let (points, tag) = match (zone.zone.kind, bias) {
            (AoiKind::Demand, MarketBias::Bullish) => {
                (w.structure_alignment, "demand_aligned_with_bull_structure")
            }
            (AoiKind::Supply, MarketBias::Bearish) => {
                (w.structure_alignment, "supply_aligned_with_bear_structure")
            }
            (_, MarketBias::Range) => (w.range_penalty, "range_structure_penalty"),
            (
                AoiKind::Demand | AoiKind::Supply,
                MarketBias::Bullish | MarketBias::Bearish | MarketBias::Transition,
            ) => (w.structure_conflict, "aoi_conflicts_with_structure"),
        };
        score += points;
        reasons.push(tag);

        if let Some(Rejection::BullishRejection | Rejection::BearishRejection) = rejection {
            score += w.rejection_inside_zone;
            reasons.push("ema_rejection_inside_aoi");
        }

        ScoreResult {
            score,
            confidence: w.thresholds.confidence(score),
            reasons,
        }
    }
}
