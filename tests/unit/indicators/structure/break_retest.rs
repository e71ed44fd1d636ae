//! Unit tests for the swing-based break/retest validator

use fxchecklist::indicators::{
    BreakRetestValidator, RetestStatus, SwingDetector, SwingRetestValidator,
};
use fxchecklist::models::{Candle, StructureBias};

use crate::fixtures::{flat_bars, zigzag};

fn validator() -> SwingRetestValidator {
    SwingRetestValidator::new(SwingDetector::new(2).unwrap(), 14, 0.2).unwrap()
}

fn path(waypoints: &[f64]) -> Vec<Candle> {
    flat_bars(&zigzag(waypoints, 5), 0.005)
}

#[test]
fn pullback_to_broken_high_confirms() {
    let candles = path(&[1.10, 1.00, 1.20, 1.12, 1.30, 1.205, 1.26]);
    assert_eq!(
        validator().validate(&candles, StructureBias::Bullish),
        RetestStatus::Confirmed
    );
}

#[test]
fn close_back_through_level_invalidates() {
    let candles = path(&[1.10, 1.00, 1.20, 1.12, 1.30, 1.10]);
    assert_eq!(
        validator().validate(&candles, StructureBias::Bullish),
        RetestStatus::Invalid
    );
}

#[test]
fn break_without_pullback_is_pending() {
    let candles = path(&[1.10, 1.00, 1.20, 1.12, 1.35]);
    assert_eq!(
        validator().validate(&candles, StructureBias::Bullish),
        RetestStatus::Pending
    );
}

#[test]
fn bearish_mirror_confirms() {
    let candles = path(&[1.30, 1.40, 1.20, 1.28, 1.10, 1.195, 1.14]);
    assert_eq!(
        validator().validate(&candles, StructureBias::Bearish),
        RetestStatus::Confirmed
    );
}

#[test]
fn nothing_broken_is_pending() {
    let candles = flat_bars(&[1.0, 1.0, 1.0], 0.001);
    assert_eq!(
        validator().validate(&candles, StructureBias::Bullish),
        RetestStatus::Pending
    );
}

#[test]
fn undirected_bias_is_invalid() {
    let candles = path(&[1.10, 1.00, 1.20, 1.12, 1.30, 1.205, 1.26]);
    assert_eq!(
        validator().validate(&candles, StructureBias::Transition),
        RetestStatus::Invalid
    );
    assert_eq!(
        validator().validate(&candles, StructureBias::Range),
        RetestStatus::Invalid
    );
}

#[test]
fn construction_rejects_bad_parameters() {
    assert!(SwingRetestValidator::new(SwingDetector::default(), 0, 0.2).is_err());
    assert!(SwingRetestValidator::new(SwingDetector::default(), 14, f64::NAN).is_err());
}
