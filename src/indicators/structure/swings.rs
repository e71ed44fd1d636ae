//! Swing (pivot) detection with alternation cleanup

use crate::error::{ensure_period, EngineError};
use crate::models::{Candle, SwingKind, SwingPoint};

/// Finds alternating local extremes.
///
/// A bar is a pivot high when its high is strictly greater than the highs of
/// the `window` bars on each side; pivot lows mirror this on the low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwingDetector {
    window: usize,
}

impl SwingDetector {
    pub const DEFAULT_WINDOW: usize = 5;

    pub fn new(window: usize) -> Result<Self, EngineError> {
        ensure_period("pivot_window", window)?;
        Ok(Self { window })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Chronological, strictly alternating swings. Empty when the input is
    /// shorter than `2 * window + 1` bars.
    pub fn detect(&self, candles: &[Candle]) -> Vec<SwingPoint> {
        enforce_alternation(pivot_candidates(candles, self.window))
    }
}

impl Default for SwingDetector {
    fn default() -> Self {
        Self {
            window: Self::DEFAULT_WINDOW,
        }
    }
}

/// All raw pivot highs and lows ordered by position.
///
/// A bar that is both a pivot high and a pivot low yields the high first.
pub fn pivot_candidates(candles: &[Candle], window: usize) -> Vec<SwingPoint> {
    let span = window.checked_mul(2).and_then(|w| w.checked_add(1));
    match span {
        Some(span) if window > 0 && candles.len() >= span => {}
        _ => return Vec::new(),
    }

    let neighbours = |i: usize| {
        (i - window..i)
            .chain(i + 1..=i + window)
            .map(move |j| &candles[j])
    };

    let mut highs = Vec::new();
    let mut lows = Vec::new();
    for i in window..candles.len() - window {
        let candle = &candles[i];
        if neighbours(i).all(|other| candle.high > other.high) {
            highs.push(SwingPoint::new(i, candle.high, SwingKind::High));
        }
        if neighbours(i).all(|other| candle.low < other.low) {
            lows.push(SwingPoint::new(i, candle.low, SwingKind::Low));
        }
    }

    let mut candidates = highs;
    candidates.extend(lows);
    // stable: keeps discovery order for equal positions
    candidates.sort_by_key(|s| s.index);
    candidates
}

/// Collapse consecutive same-kind candidates to the most extreme one.
pub fn enforce_alternation(candidates: Vec<SwingPoint>) -> Vec<SwingPoint> {
    let mut clean: Vec<SwingPoint> = Vec::with_capacity(candidates.len());

    for current in candidates {
        match clean.last_mut() {
            Some(last) if last.kind == current.kind => {
                let more_extreme = match current.kind {
                    SwingKind::High => current.price > last.price,
                    SwingKind::Low => current.price < last.price,
                };
                if more_extreme {
                    *last = current;
                }
            }
            _ => clean.push(current),
        }
    }

    clean
}
