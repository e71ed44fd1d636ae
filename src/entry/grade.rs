//! Composite entry quality grade

use serde::{Deserialize, Serialize};

use crate::entry::candle::EntrySignal;
use crate::entry::volume::VolumeState;
use crate::models::TrendBias;
use crate::signals::weights::EntryGradeWeights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "skip")]
    Skip,
}

/// Additive quality score
pub fn grade_score(
    trend: TrendBias,
    ema_score: i32,
    signal: Option<EntrySignal>,
    volume: Option<VolumeState>,
    weights: &EntryGradeWeights,
) -> i32 {
    let mut score = 0;
    if trend.is_directional() {
        score += weights.trend;
    }
    if ema_score >= weights.ema_strength_min {
        score += weights.ema_strength;
    }
    if signal.is_some() {
        score += weights.entry_signal;
    }
    if volume == Some(VolumeState::High) {
        score += weights.high_volume;
    }
    score
}

pub fn grade_from_score(score: i32, weights: &EntryGradeWeights) -> EntryGrade {
    if score >= weights.a_plus {
        EntryGrade::APlus
    } else if score >= weights.a {
        EntryGrade::A
    } else if score >= weights.b {
        EntryGrade::B
    } else {
        EntryGrade::Skip
    }
}
