//! Structure bias from the last four swings, plus break-of-structure detection

use tracing::debug;

use crate::indicators::structure::swings::SwingDetector;
use crate::models::{Candle, StructureBias, StructureState, SwingKind, SwingPoint};

const BULLISH_TEMPLATE: [SwingKind; 4] = [
    SwingKind::Low,
    SwingKind::High,
    SwingKind::Low,
    SwingKind::High,
];
const BEARISH_TEMPLATE: [SwingKind; 4] = [
    SwingKind::High,
    SwingKind::Low,
    SwingKind::High,
    SwingKind::Low,
];

/// Classify bias from an alternating swing sequence.
///
/// Bullish needs Low, High, higher Low, higher High as the last four swings;
/// Bearish is the mirror. Everything else, including fewer than four swings, is
/// `Transition`. `Range` is never produced here.
pub fn classify_structure(swings: &[SwingPoint]) -> StructureBias {
    if swings.len() < 4 {
        return StructureBias::Transition;
    }

    let last = &swings[swings.len() - 4..];
    let kinds = [last[0].kind, last[1].kind, last[2].kind, last[3].kind];
    let [a, b, c, d] = [last[0].price, last[1].price, last[2].price, last[3].price];

    if kinds == BULLISH_TEMPLATE && c > a && d > b {
        return StructureBias::Bullish;
    }
    if kinds == BEARISH_TEMPLATE && c < a && d < b {
        return StructureBias::Bearish;
    }

    StructureBias::Transition
}

/// Break of structure on the latest close.
///
/// Bullish: close above the most recent swing high. Bearish: close below the
/// most recent swing low. Always false for `Transition` and `Range`.
pub fn detect_bos(candles: &[Candle], swings: &[SwingPoint], bias: StructureBias) -> bool {
    let Some(latest) = candles.last() else {
        return false;
    };

    let last_of = |kind: SwingKind| swings.iter().rev().find(|s| s.kind == kind);

    match bias {
        StructureBias::Bullish => last_of(SwingKind::High)
            .map(|high| latest.close > high.price)
            .unwrap_or(false),
        StructureBias::Bearish => last_of(SwingKind::Low)
            .map(|low| latest.close < low.price)
            .unwrap_or(false),
        StructureBias::Transition | StructureBias::Range => false,
    }
}

/// Swings, bias and BOS in one pass
pub fn analyze_market_structure(candles: &[Candle], detector: &SwingDetector) -> StructureState {
    let swings = detector.detect(candles);
    let bias = classify_structure(&swings);
    let bos = detect_bos(candles, &swings, bias);

    debug!(
        swings = swings.len(),
        bias = bias.as_str(),
        bos,
        "market structure classified"
    );

    StructureState { bias, swings, bos }
}
