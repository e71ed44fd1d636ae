//! Psychological (round-number) price levels

use serde::{Deserialize, Serialize};

/// Pips between two big round numbers
const BIG_ROUND_PIPS: f64 = 100.0;
const HALF_ROUND_PIPS: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PsychLevelType {
    BigRound,
    HalfRound,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PsychLevel {
    pub kind: PsychLevelType,
    pub price: f64,
    pub distance_pips: f64,
}

/// Round-number levels within `radius_pips` of `price`, nearest first.
///
/// Big rounds sit on multiples of 100 pips (1.2000), half rounds halfway
/// between (1.2050).
pub fn detect_psych_levels(price: f64, pip_size: f64, radius_pips: f64) -> Vec<PsychLevel> {
    if pip_size.is_nan() || pip_size <= 0.0 || !price.is_finite() {
        return Vec::new();
    }

    let big_step = BIG_ROUND_PIPS * pip_size;
    let big = (price / big_step).round() * big_step;
    let half = HALF_ROUND_PIPS * pip_size;

    let mut levels: Vec<PsychLevel> = [
        (PsychLevelType::BigRound, big),
        (PsychLevelType::HalfRound, big + half),
        (PsychLevelType::HalfRound, big - half),
    ]
    .into_iter()
    .map(|(kind, level)| PsychLevel {
        kind,
        price: level,
        distance_pips: (price - level).abs() / pip_size,
    })
    .filter(|level| level.distance_pips <= radius_pips)
    .collect();

    levels.sort_by(|a, b| a.distance_pips.total_cmp(&b.distance_pips));
    levels
}

/// True when any round-number level lies within `radius_pips`
pub fn near_psych_level(price: f64, pip_size: f64, radius_pips: f64) -> bool {
    !detect_psych_levels(price, pip_size, radius_pips).is_empty()
}
