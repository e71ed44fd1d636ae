//! Coarse trend bias from structure and moving-average state

use crate::models::{PricePosition, Slope, StructureBias, TrendBias, TrendReading, TrendState};

/// Conservative trend classification.
///
/// Bullish needs bullish structure, an up-sloping average and price above it
/// (or just crossing up). Bearish mirrors. A flat average is `Range`
/// regardless of structure. Anything else is `Transition`.
pub fn classify_trend(structure: StructureBias, state: &TrendState) -> TrendBias {
    let bullish_position = matches!(state.position, PricePosition::Above | PricePosition::CrossUp);
    let bearish_position =
        matches!(state.position, PricePosition::Below | PricePosition::CrossDown);

    match (structure, state.slope) {
        (StructureBias::Bullish, Slope::Up) if bullish_position => TrendBias::Bullish,
        (StructureBias::Bearish, Slope::Down) if bearish_position => TrendBias::Bearish,
        (_, Slope::Flat) => TrendBias::Range,
        (
            StructureBias::Bullish
            | StructureBias::Bearish
            | StructureBias::Transition
            | StructureBias::Range,
            Slope::Up | Slope::Down,
        ) => TrendBias::Transition,
    }
}

/// Like [`classify_trend`]; an invalid reading has no clear trend.
pub fn classify_reading(structure: StructureBias, reading: &TrendReading) -> TrendBias {
    match reading {
        TrendReading::Valid(state) => classify_trend(structure, state),
        TrendReading::Invalid { .. } => TrendBias::Transition,
    }
}
