use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwingKind {
    High,
    Low,
}

/// A confirmed pivot: a bar whose extreme beats every neighbour in the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwingPoint {
    /// Position of the pivot candle in the series
    pub index: usize,
    pub price: f64,
    pub kind: SwingKind,
}

impl SwingPoint {
    pub fn new(index: usize, price: f64, kind: SwingKind) -> Self {
        Self { index, price, kind }
    }
}

/// Directional read produced by the structure classifier.
///
/// `Range` is never emitted by swing classification; it is kept for
/// externally supplied bias (e.g. a manual override) and is handled by every
/// consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureBias {
    Bullish,
    Bearish,
    Transition,
    Range,
}

impl StructureBias {
    pub fn as_str(&self) -> &'static str {
        match self {
            StructureBias::Bullish => "bullish",
            StructureBias::Bearish => "bearish",
            StructureBias::Transition => "transition",
            StructureBias::Range => "range",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureState {
    pub bias: StructureBias,
    pub swings: Vec<SwingPoint>,
    /// Break of structure on the latest close
    pub bos: bool,
}
