//! Unit tests for series math helpers

use fxchecklist::common::math::{ema_series, rolling_mean, sma, true_range};

#[test]
fn ema_series_is_seeded_with_first_value() {
    let values = [10.0, 11.0, 12.0];
    let out = ema_series(&values, 3);
    assert_eq!(out.len(), 3);
    assert_eq!(out[0], 10.0);
    // alpha = 0.5
    assert!((out[1] - 10.5).abs() < 1e-12);
    assert!((out[2] - 11.25).abs() < 1e-12);
}

#[test]
fn sma_uses_trailing_window() {
    assert_eq!(sma(&[1.0, 2.0, 3.0, 4.0], 2), Some(3.5));
    assert_eq!(sma(&[1.0], 2), None);
    assert_eq!(sma(&[1.0], 0), None);
}

#[test]
fn rolling_mean_leaves_warmup_empty() {
    let out = rolling_mean(&[2.0, 4.0, 6.0, 8.0], 3);
    assert_eq!(out, vec![None, None, Some(4.0), Some(6.0)]);
}

#[test]
fn true_range_accounts_for_gaps() {
    assert_eq!(true_range(1.2, 1.0, None), 1.2 - 1.0);
    // gap up from 0.8
    assert!((true_range(1.2, 1.0, Some(0.8)) - 0.4).abs() < 1e-12);
    // gap down from 1.5
    assert!((true_range(1.2, 1.0, Some(1.5)) - 0.5).abs() < 1e-12);
}
