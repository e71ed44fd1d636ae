use serde::{Deserialize, Serialize};

/// Bias vocabulary used by the scorers.
///
/// Same variants as [`StructureBias`](crate::models::StructureBias); convert
/// with `adapt_bias` or `From`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketBias {
    Bullish,
    Bearish,
    Transition,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Weak,
    Moderate,
    Strong,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Weak => "weak",
            Confidence::Moderate => "moderate",
            Confidence::Strong => "strong",
        }
    }
}

/// Score with its confidence tier and the tags of every rule that fired, in
/// evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub score: i32,
    pub confidence: Confidence,
    pub reasons: Vec<&'static str>,
}
