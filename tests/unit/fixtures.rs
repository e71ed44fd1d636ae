//! Hand-built candle fixtures shared by the unit tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use fxchecklist::models::{Candle, Series};

pub fn ts(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(i as i64)
}

pub fn candle(i: usize, open: f64, high: f64, low: f64, close: f64) -> Candle {
    Candle::new(open, high, low, close, 1000.0, ts(i))
}

/// Doji bars centred on each price, `spread` above and below.
pub fn flat_bars(prices: &[f64], spread: f64) -> Vec<Candle> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| candle(i, p, p + spread, p - spread, p))
        .collect()
}

/// Bars walking a close path; each bar opens at the previous close.
pub fn trending_bars(closes: &[f64], spread: f64) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            candle(
                i,
                open,
                open.max(close) + spread,
                open.min(close) - spread,
                close,
            )
        })
        .collect()
}

/// Linear path through `waypoints`, `steps` bars per leg.
pub fn zigzag(waypoints: &[f64], steps: usize) -> Vec<f64> {
    let mut path = Vec::new();
    for pair in waypoints.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        for k in 0..steps {
            path.push(from + (to - from) * k as f64 / steps as f64);
        }
    }
    if let Some(&last) = waypoints.last() {
        path.push(last);
    }
    path
}

/// Steady climb of `step` per bar starting at `start`.
pub fn rising(count: usize, start: f64, step: f64) -> Vec<f64> {
    (0..count).map(|i| start + step * i as f64).collect()
}

pub fn series(candles: Vec<Candle>) -> Series {
    Series::new(candles).expect("valid fixture")
}

/// Deterministic pseudo-random walk for property-style checks.
pub fn random_walk(count: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    let mut price = 1.1;
    (0..count)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let step = ((state >> 33) % 21) as f64 - 10.0;
            price += step * 0.0001;
            price
        })
        .collect()
}
