//! Unit tests for the entry gate

use fxchecklist::entry::{
    Decision, EntryCheck, EntryContext, EntryEngine, EntryGrade, EntryParams, EntrySignal,
    ReasonCode, VolumeState, ENTRY_CHECKS,
};
use fxchecklist::indicators::{BreakRetestValidator, RetestStatus};
use fxchecklist::models::{Candle, Confidence, StructureBias, TrendBias};
use fxchecklist::signals::EntryGradeWeights;

use crate::fixtures::ts;

#[derive(Debug, Clone, Copy, PartialEq)]
struct FixedRetest(RetestStatus);

impl BreakRetestValidator for FixedRetest {
    fn validate(&self, _candles: &[Candle], _bias: StructureBias) -> RetestStatus {
        self.0
    }
}

fn engine(status: RetestStatus) -> EntryEngine<FixedRetest> {
    EntryEngine::with_validator(EntryParams::default(), FixedRetest(status)).unwrap()
}

fn context() -> EntryContext {
    EntryContext {
        trend_bias: TrendBias::Bullish,
        structure_bias: StructureBias::Bullish,
        ema_confidence: Confidence::Strong,
        ema_score: 45,
        in_zone: true,
        at_key_level: false,
    }
}

/// 25 quiet bars ending in a bullish momentum bar on `last_volume`.
fn momentum_bars(last_volume: f64) -> Vec<Candle> {
    let mut candles: Vec<Candle> = (0..23)
        .map(|i| Candle::new(1.1, 1.101, 1.099, 1.1, 1000.0, ts(i)))
        .collect();
    candles.push(Candle::new(1.1000, 1.1010, 1.0995, 1.1005, 1000.0, ts(23)));
    candles.push(Candle::new(1.1000, 1.1032, 1.0998, 1.1030, last_volume, ts(24)));
    candles
}

#[test]
fn checks_run_in_documented_order() {
    let names: Vec<&str> = ENTRY_CHECKS.iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        vec![
            "clear_trend",
            "ema_confidence",
            "inside_zone",
            "break_retest",
            "entry_candle",
            "volume",
            "quality"
        ]
    );
    assert_eq!(EntryCheck::Volume.failure(), None);
    assert_eq!(
        EntryCheck::EntryCandle.failure(),
        Some((Decision::Wait, ReasonCode::NoEntryCandle))
    );
}

#[test]
fn full_setup_trades_a_plus() {
    let decision = engine(RetestStatus::Confirmed).evaluate(&momentum_bars(2000.0), &context());
    assert_eq!(decision.decision, Decision::Trade);
    assert_eq!(decision.reason, None);
    assert_eq!(decision.entry_type, Some(EntrySignal::BullishMomentum));
    assert_eq!(decision.volume, Some(VolumeState::High));
    assert_eq!(decision.score, Some(70));
    assert_eq!(decision.grade, Some(EntryGrade::APlus));
}

#[test]
fn pending_retest_does_not_block() {
    let decision = engine(RetestStatus::Pending).evaluate(&momentum_bars(1000.0), &context());
    assert_eq!(decision.decision, Decision::Trade);
    assert_eq!(decision.volume, Some(VolumeState::Low));
    assert_eq!(decision.score, Some(60));
    assert_eq!(decision.grade, Some(EntryGrade::APlus));
}

#[test]
fn undirected_trend_has_no_clear_trend() {
    for trend_bias in [TrendBias::Range, TrendBias::Transition] {
        let ctx = EntryContext {
            trend_bias,
            ..context()
        };
        let decision = engine(RetestStatus::Confirmed).evaluate(&momentum_bars(2000.0), &ctx);
        assert_eq!(decision.decision, Decision::NoTrade);
        assert_eq!(decision.reason, Some(ReasonCode::NoClearTrend));
    }
}

#[test]
fn weak_ema_is_rejected() {
    let ctx = EntryContext {
        ema_confidence: Confidence::Weak,
        ..context()
    };
    let decision = engine(RetestStatus::Confirmed).evaluate(&momentum_bars(2000.0), &ctx);
    assert_eq!(decision.reason, Some(ReasonCode::EmaWeak));
}

#[test]
fn outside_zone_wins_over_everything_after_it() {
    let candle_sets = [momentum_bars(2000.0), Vec::new()];
    for status in [RetestStatus::Confirmed, RetestStatus::Pending, RetestStatus::Invalid] {
        for at_key_level in [false, true] {
            for ema_score in [-30, 0, 45, 90] {
                for structure_bias in [
                    StructureBias::Bullish,
                    StructureBias::Bearish,
                    StructureBias::Transition,
                    StructureBias::Range,
                ] {
                    for candles in &candle_sets {
                        let ctx = EntryContext {
                            in_zone: false,
                            at_key_level,
                            ema_score,
                            structure_bias,
                            ..context()
                        };
                        let decision = engine(status).evaluate(candles, &ctx);
                        assert_eq!(decision.decision, Decision::NoTrade);
                        assert_eq!(decision.reason, Some(ReasonCode::OutsideAoi));
                    }
                }
            }
        }
    }
}

#[test]
fn invalid_retest_is_rejected() {
    let decision = engine(RetestStatus::Invalid).evaluate(&momentum_bars(2000.0), &context());
    assert_eq!(decision.decision, Decision::NoTrade);
    assert_eq!(decision.reason, Some(ReasonCode::BadRetest));
}

#[test]
fn missing_pattern_waits() {
    // momentum bar, but a key level demands a rejection
    let ctx = EntryContext {
        at_key_level: true,
        ..context()
    };
    let decision = engine(RetestStatus::Confirmed).evaluate(&momentum_bars(2000.0), &ctx);
    assert_eq!(decision.decision, Decision::Wait);
    assert_eq!(decision.reason, Some(ReasonCode::NoEntryCandle));
    assert_eq!(decision.entry_type, None);
}

#[test]
fn low_quality_is_rejected() {
    let params = EntryParams {
        grade: EntryGradeWeights {
            a_plus: 70,
            a: 60,
            b: 50,
            ..EntryGradeWeights::STANDARD
        },
        ..EntryParams::default()
    };
    let engine = EntryEngine::with_validator(params, FixedRetest(RetestStatus::Confirmed)).unwrap();
    let ctx = EntryContext {
        ema_score: 0,
        ..context()
    };
    // trend 20 + signal 20, low volume
    let decision = engine.evaluate(&momentum_bars(1000.0), &ctx);
    assert_eq!(decision.decision, Decision::NoTrade);
    assert_eq!(decision.reason, Some(ReasonCode::LowQuality));
}

#[test]
fn each_check_can_run_alone() {
    let e = engine(RetestStatus::Confirmed);
    let candles = momentum_bars(2000.0);

    assert!(e.check(EntryCheck::InsideZone, &candles, &context()));
    let outside = EntryContext {
        in_zone: false,
        ..context()
    };
    assert!(!e.check(EntryCheck::InsideZone, &candles, &outside));
    assert!(e.check(EntryCheck::EntryCandle, &candles, &context()));
    assert!(e.check(EntryCheck::Volume, &[], &context()));
    assert!(e.check(EntryCheck::Quality, &candles, &context()));
    assert!(!engine(RetestStatus::Invalid).check(EntryCheck::Retest, &candles, &context()));
}

#[test]
fn decision_serializes_with_snake_case_reason() {
    let ctx = EntryContext {
        in_zone: false,
        ..context()
    };
    let decision = engine(RetestStatus::Confirmed).evaluate(&momentum_bars(2000.0), &ctx);
    let json = serde_json::to_value(decision).unwrap();
    assert_eq!(json["decision"], "no_trade");
    assert_eq!(json["reason"], "outside_aoi");
    assert!(json.get("grade").is_none());
}

#[test]
fn invalid_params_fail_at_construction() {
    let mut params = EntryParams::default();
    params.volume.lookback = 0;
    assert!(EntryEngine::new(params).is_err());
}
