//! Weight tables for the additive scorers and the entry grade.
//!
//! Each table is a named constant so individual rules can be tested and
//! retuned without touching control flow. The EMA and AOI tables are
//! independent and intentionally not unified.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::Confidence;

/// Score cut-offs for the confidence tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub strong: i32,
    pub moderate: i32,
}

impl Thresholds {
    pub fn confidence(&self, score: i32) -> Confidence {
        if score >= self.strong {
            Confidence::Strong
        } else if score >= self.moderate {
            Confidence::Moderate
        } else {
            Confidence::Weak
        }
    }

    fn validate(&self, table: &str) -> Result<(), EngineError> {
        if self.strong <= self.moderate {
            return Err(EngineError::config(
                format!("{table}.thresholds"),
                format!(
                    "strong ({}) must be above moderate ({})",
                    self.strong, self.moderate
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmaWeights {
    pub slope_up: i32,
    pub slope_down: i32,
    pub flat_penalty: i32,
    pub price_above: i32,
    pub price_below: i32,
    pub rejection: i32,
    pub structure_alignment: i32,
    pub range_penalty: i32,
    pub structure_conflict: i32,
    pub inside_zone: i32,
    pub thresholds: Thresholds,
}

impl EmaWeights {
    pub const STANDARD: EmaWeights = EmaWeights {
        slope_up: 10,
        slope_down: 10,
        flat_penalty: -15,
        price_above: 5,
        price_below: 5,
        rejection: 10,
        structure_alignment: 15,
        range_penalty: -10,
        structure_conflict: -20,
        inside_zone: 10,
        thresholds: Thresholds {
            strong: 40,
            moderate: 20,
        },
    };

    pub fn validate(&self) -> Result<(), EngineError> {
        self.thresholds.validate("ema_weights")
    }
}

impl Default for EmaWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AoiWeights {
    pub fresh_zone: i32,
    pub tested_once: i32,
    pub over_tested: i32,
    pub strong_reaction: i32,
    pub weak_reaction: i32,
    pub htf_bonus: i32,
    pub ltf_bonus: i32,
    pub structure_alignment: i32,
    pub range_penalty: i32,
    pub structure_conflict: i32,
    pub rejection_inside_zone: i32,
    pub thresholds: Thresholds,
}

impl AoiWeights {
    pub const STANDARD: AoiWeights = AoiWeights {
        fresh_zone: 20,
        tested_once: 10,
        over_tested: -20,
        strong_reaction: 15,
        weak_reaction: 5,
        htf_bonus: 15,
        ltf_bonus: 5,
        structure_alignment: 20,
        range_penalty: -10,
        structure_conflict: -25,
        rejection_inside_zone: 10,
        thresholds: Thresholds {
            strong: 50,
            moderate: 25,
        },
    };

    pub fn validate(&self) -> Result<(), EngineError> {
        self.thresholds.validate("aoi_weights")
    }
}

impl Default for AoiWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryGradeWeights {
    pub trend: i32,
    pub ema_strength: i32,
    /// EMA score needed for the `ema_strength` points
    pub ema_strength_min: i32,
    pub entry_signal: i32,
    pub high_volume: i32,
    pub a_plus: i32,
    pub a: i32,
    pub b: i32,
}

impl EntryGradeWeights {
    pub const STANDARD: EntryGradeWeights = EntryGradeWeights {
        trend: 20,
        ema_strength: 20,
        ema_strength_min: 40,
        entry_signal: 20,
        high_volume: 10,
        a_plus: 60,
        a: 45,
        b: 30,
    };

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.a_plus > self.a && self.a > self.b) {
            return Err(EngineError::config(
                "entry_grade_weights",
                format!(
                    "grade cut-offs must be strictly ordered, got A+={} A={} B={}",
                    self.a_plus, self.a, self.b
                ),
            ));
        }
        Ok(())
    }
}

impl Default for EntryGradeWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}
