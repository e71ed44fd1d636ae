//! Entry engine: ordered hard filters with early exit.
//!
//! The checks run in the order of [`ENTRY_CHECKS`]; the first failing check
//! ends the evaluation with its decision and reason code. Nothing is carried
//! between calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::entry::candle::{detect_entry_candle, Direction, EntryCandleParams, EntrySignal};
use crate::entry::grade::{grade_from_score, grade_score, EntryGrade};
use crate::entry::volume::{evaluate_volume, VolumeParams, VolumeState};
use crate::error::{ensure_factor, ensure_period, EngineError};
use crate::indicators::structure::{BreakRetestValidator, RetestStatus, SwingRetestValidator};
use crate::models::{Candle, Confidence, StructureBias, TrendBias};
use crate::signals::weights::EntryGradeWeights;

/// Snapshot of upstream analysis handed to the entry engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryContext {
    pub trend_bias: TrendBias,
    pub structure_bias: StructureBias,
    pub ema_confidence: Confidence,
    pub ema_score: i32,
    /// Price is currently inside a reaction zone
    pub in_zone: bool,
    /// A key level is active; only rejection entries qualify
    #[serde(default)]
    pub at_key_level: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Trade,
    Wait,
    NoTrade,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Trade => "trade",
            Decision::Wait => "wait",
            Decision::NoTrade => "no_trade",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    NoClearTrend,
    EmaWeak,
    OutsideAoi,
    BadRetest,
    NoEntryCandle,
    LowQuality,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::NoClearTrend => "no_clear_trend",
            ReasonCode::EmaWeak => "ema_weak",
            ReasonCode::OutsideAoi => "outside_aoi",
            ReasonCode::BadRetest => "bad_retest",
            ReasonCode::NoEntryCandle => "no_entry_candle",
            ReasonCode::LowQuality => "low_quality",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryDecision {
    pub decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ReasonCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<EntrySignal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<EntryGrade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<VolumeState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
}

impl EntryDecision {
    fn rejected(decision: Decision, reason: ReasonCode) -> Self {
        Self {
            decision,
            reason: Some(reason),
            entry_type: None,
            grade: None,
            volume: None,
            score: None,
        }
    }
}

/// One named step of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryCheck {
    ClearTrend,
    EmaConfidence,
    InsideZone,
    Retest,
    EntryCandle,
    Volume,
    Quality,
}

/// Evaluation order of the gate
pub const ENTRY_CHECKS: [EntryCheck; 7] = [
    EntryCheck::ClearTrend,
    EntryCheck::EmaConfidence,
    EntryCheck::InsideZone,
    EntryCheck::Retest,
    EntryCheck::EntryCandle,
    EntryCheck::Volume,
    EntryCheck::Quality,
];

impl EntryCheck {
    pub fn name(&self) -> &'static str {
        match self {
            EntryCheck::ClearTrend => "clear_trend",
            EntryCheck::EmaConfidence => "ema_confidence",
            EntryCheck::InsideZone => "inside_zone",
            EntryCheck::Retest => "break_retest",
            EntryCheck::EntryCandle => "entry_candle",
            EntryCheck::Volume => "volume",
            EntryCheck::Quality => "quality",
        }
    }

    /// Decision and reason when the check fails. The volume step grades
    /// rather than filters and never fails.
    pub fn failure(&self) -> Option<(Decision, ReasonCode)> {
        match self {
            EntryCheck::ClearTrend => Some((Decision::NoTrade, ReasonCode::NoClearTrend)),
            EntryCheck::EmaConfidence => Some((Decision::NoTrade, ReasonCode::EmaWeak)),
            EntryCheck::InsideZone => Some((Decision::NoTrade, ReasonCode::OutsideAoi)),
            EntryCheck::Retest => Some((Decision::NoTrade, ReasonCode::BadRetest)),
            EntryCheck::EntryCandle => Some((Decision::Wait, ReasonCode::NoEntryCandle)),
            EntryCheck::Volume => None,
            EntryCheck::Quality => Some((Decision::NoTrade, ReasonCode::LowQuality)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryParams {
    pub candle: EntryCandleParams,
    pub volume: VolumeParams,
    pub grade: EntryGradeWeights,
}

impl Default for EntryParams {
    fn default() -> Self {
        Self {
            candle: EntryCandleParams::default(),
            volume: VolumeParams::default(),
            grade: EntryGradeWeights::STANDARD,
        }
    }
}

impl EntryParams {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.candle.validate()?;
        ensure_period("volume_lookback", self.volume.lookback)?;
        ensure_factor("volume_momentum_ratio", self.volume.momentum_ratio)?;
        ensure_factor("volume_normal_ratio", self.volume.normal_ratio)?;
        self.grade.validate()
    }
}

/// Values produced while walking the checks
struct Evaluation<'a> {
    candles: &'a [Candle],
    context: &'a EntryContext,
    signal: Option<EntrySignal>,
    volume: Option<VolumeState>,
    score: i32,
    grade: EntryGrade,
}

impl<'a> Evaluation<'a> {
    fn new(candles: &'a [Candle], context: &'a EntryContext) -> Self {
        Self {
            candles,
            context,
            signal: None,
            volume: None,
            score: 0,
            grade: EntryGrade::Skip,
        }
    }

    fn direction(&self) -> Option<Direction> {
        match self.context.trend_bias {
            TrendBias::Bullish => Some(Direction::Bullish),
            TrendBias::Bearish => Some(Direction::Bearish),
            TrendBias::Range | TrendBias::Transition => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryEngine<V = SwingRetestValidator> {
    params: EntryParams,
    validator: V,
}

impl EntryEngine<SwingRetestValidator> {
    pub fn new(params: EntryParams) -> Result<Self, EngineError> {
        Self::with_validator(params, SwingRetestValidator::default())
    }
}

impl Default for EntryEngine<SwingRetestValidator> {
    fn default() -> Self {
        Self {
            params: EntryParams::default(),
            validator: SwingRetestValidator::default(),
        }
    }
}

impl<V: BreakRetestValidator> EntryEngine<V> {
    pub fn with_validator(params: EntryParams, validator: V) -> Result<Self, EngineError> {
        params.validate()?;
        Ok(Self { params, validator })
    }

    pub fn params(&self) -> &EntryParams {
        &self.params
    }

    /// Walk every check in order; stop at the first failure.
    pub fn evaluate(&self, candles: &[Candle], context: &EntryContext) -> EntryDecision {
        let mut eval = Evaluation::new(candles, context);

        for check in ENTRY_CHECKS {
            if self.run(check, &mut eval) {
                continue;
            }
            if let Some((decision, reason)) = check.failure() {
                debug!(
                    check = check.name(),
                    reason = reason.as_str(),
                    "entry gate stopped"
                );
                return EntryDecision::rejected(decision, reason);
            }
        }

        info!(
            entry = eval.signal.map(|s| s.as_str()),
            score = eval.score,
            grade = ?eval.grade,
            "entry accepted"
        );

        EntryDecision {
            decision: Decision::Trade,
            reason: None,
            entry_type: eval.signal,
            grade: Some(eval.grade),
            volume: eval.volume,
            score: Some(eval.score),
        }
    }

    /// Run a single check in isolation.
    ///
    /// Value-producing steps the check depends on (entry candle, volume) are
    /// computed first without gating.
    pub fn check(&self, check: EntryCheck, candles: &[Candle], context: &EntryContext) -> bool {
        let mut eval = Evaluation::new(candles, context);
        if matches!(check, EntryCheck::Volume | EntryCheck::Quality) {
            self.run(EntryCheck::EntryCandle, &mut eval);
        }
        if check == EntryCheck::Quality {
            self.run(EntryCheck::Volume, &mut eval);
        }
        self.run(check, &mut eval)
    }

    fn run(&self, check: EntryCheck, eval: &mut Evaluation<'_>) -> bool {
        let context = eval.context;
        match check {
            EntryCheck::ClearTrend => context.trend_bias.is_directional(),
            EntryCheck::EmaConfidence => context.ema_confidence != Confidence::Weak,
            EntryCheck::InsideZone => context.in_zone,
            EntryCheck::Retest => {
                let status = self
                    .validator
                    .validate(eval.candles, context.structure_bias);
                status != RetestStatus::Invalid
            }
            EntryCheck::EntryCandle => {
                eval.signal = eval.direction().and_then(|direction| {
                    detect_entry_candle(
                        eval.candles,
                        direction,
                        context.at_key_level,
                        &self.params.candle,
                    )
                });
                eval.signal.is_some()
            }
            EntryCheck::Volume => {
                let momentum = eval.signal.is_some_and(|s| s.is_momentum());
                eval.volume = Some(evaluate_volume(
                    eval.candles,
                    &self.params.volume,
                    momentum,
                ));
                true
            }
            EntryCheck::Quality => {
                eval.score = grade_score(
                    context.trend_bias,
                    context.ema_score,
                    eval.signal,
                    eval.volume,
                    &self.params.grade,
                );
                eval.grade = grade_from_score(eval.score, &self.params.grade);
                eval.grade != EntryGrade::Skip
            }
        }
    }
}
