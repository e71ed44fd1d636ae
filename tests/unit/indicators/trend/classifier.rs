//! Unit tests for the coarse trend classifier

use fxchecklist::indicators::{classify_reading, classify_trend};
use fxchecklist::models::{
    PricePosition, Rejection, Slope, StructureBias, TrendBias, TrendReading, TrendState,
};

fn state(slope: Slope, position: PricePosition) -> TrendState {
    TrendState {
        value: 1.1,
        price: 1.1,
        volatility: 0.001,
        slope,
        position,
        rejection: Rejection::None,
        distance: 0.0,
    }
}

#[test]
fn aligned_bullish_inputs_are_bullish() {
    let s = state(Slope::Up, PricePosition::Above);
    assert_eq!(classify_trend(StructureBias::Bullish, &s), TrendBias::Bullish);
    let s = state(Slope::Up, PricePosition::CrossUp);
    assert_eq!(classify_trend(StructureBias::Bullish, &s), TrendBias::Bullish);
}

#[test]
fn aligned_bearish_inputs_are_bearish() {
    let s = state(Slope::Down, PricePosition::Below);
    assert_eq!(classify_trend(StructureBias::Bearish, &s), TrendBias::Bearish);
}

#[test]
fn flat_average_is_range_for_any_structure() {
    let s = state(Slope::Flat, PricePosition::Above);
    for bias in [
        StructureBias::Bullish,
        StructureBias::Bearish,
        StructureBias::Transition,
        StructureBias::Range,
    ] {
        assert_eq!(classify_trend(bias, &s), TrendBias::Range);
    }
}

#[test]
fn disagreement_is_transition() {
    let s = state(Slope::Up, PricePosition::Below);
    assert_eq!(classify_trend(StructureBias::Bullish, &s), TrendBias::Transition);
    let s = state(Slope::Down, PricePosition::Below);
    assert_eq!(classify_trend(StructureBias::Bullish, &s), TrendBias::Transition);
    let s = state(Slope::Up, PricePosition::OnZone);
    assert_eq!(classify_trend(StructureBias::Bullish, &s), TrendBias::Transition);
}

#[test]
fn invalid_reading_has_no_clear_trend() {
    let reading = TrendReading::Invalid {
        required: 70,
        actual: 10,
    };
    assert_eq!(
        classify_reading(StructureBias::Bullish, &reading),
        TrendBias::Transition
    );
}
