//! Unit tests for entry candle patterns

use fxchecklist::entry::{detect_entry_candle, Direction, EntryCandleParams, EntrySignal};

use crate::fixtures::candle;

fn params() -> EntryCandleParams {
    EntryCandleParams::default()
}

#[test]
fn bullish_rejection_at_key_level() {
    let candles = vec![
        candle(0, 1.1000, 1.1015, 1.0995, 1.1010),
        candle(1, 1.1010, 1.1022, 1.0980, 1.1020),
    ];
    assert_eq!(
        detect_entry_candle(&candles, Direction::Bullish, true, &params()),
        Some(EntrySignal::BullishRejection)
    );
    // small body is not momentum away from a key level
    assert_eq!(
        detect_entry_candle(&candles, Direction::Bullish, false, &params()),
        None
    );
}

#[test]
fn bearish_rejection_needs_close_near_low() {
    let good = vec![
        candle(0, 1.1000, 1.1010, 1.0990, 1.1000),
        candle(1, 1.1010, 1.1050, 1.0998, 1.1000),
    ];
    assert_eq!(
        detect_entry_candle(&good, Direction::Bearish, true, &params()),
        Some(EntrySignal::BearishRejection)
    );

    // long upper wick but the close sits mid-range
    let mid = vec![
        candle(0, 1.1000, 1.1010, 1.0990, 1.1000),
        candle(1, 1.1030, 1.1050, 1.0990, 1.1020),
    ];
    assert_eq!(
        detect_entry_candle(&mid, Direction::Bearish, true, &params()),
        None
    );
}

#[test]
fn momentum_breaks_previous_extreme() {
    let candles = vec![
        candle(0, 1.1000, 1.1010, 1.0995, 1.1005),
        candle(1, 1.1000, 1.1032, 1.0998, 1.1030),
    ];
    assert_eq!(
        detect_entry_candle(&candles, Direction::Bullish, false, &params()),
        Some(EntrySignal::BullishMomentum)
    );
    assert_eq!(
        detect_entry_candle(&candles, Direction::Bearish, false, &params()),
        None
    );
    // key level active: momentum does not qualify
    assert_eq!(
        detect_entry_candle(&candles, Direction::Bullish, true, &params()),
        None
    );
}

#[test]
fn bearish_momentum() {
    let candles = vec![
        candle(0, 1.1000, 1.1010, 1.0990, 1.0995),
        candle(1, 1.0995, 1.0997, 1.0960, 1.0962),
    ];
    assert_eq!(
        detect_entry_candle(&candles, Direction::Bearish, false, &params()),
        Some(EntrySignal::BearishMomentum)
    );
}

#[test]
fn momentum_must_close_beyond_prior_bar() {
    let candles = vec![
        candle(0, 1.1000, 1.1040, 1.0995, 1.1035),
        candle(1, 1.1000, 1.1032, 1.0998, 1.1030),
    ];
    assert_eq!(
        detect_entry_candle(&candles, Direction::Bullish, false, &params()),
        None
    );
}

#[test]
fn degenerate_inputs_yield_nothing() {
    let one = vec![candle(0, 1.1, 1.2, 1.0, 1.19)];
    assert_eq!(detect_entry_candle(&one, Direction::Bullish, false, &params()), None);

    let flat = vec![candle(0, 1.1, 1.1, 1.1, 1.1), candle(1, 1.1, 1.1, 1.1, 1.1)];
    assert_eq!(detect_entry_candle(&flat, Direction::Bullish, true, &params()), None);
}

#[test]
fn params_are_validated() {
    let bad = EntryCandleParams {
        close_zone: 1.5,
        ..EntryCandleParams::default()
    };
    assert!(bad.validate().is_err());
    assert!(EntryCandleParams::default().validate().is_ok());
}
