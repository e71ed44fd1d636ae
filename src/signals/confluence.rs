//! Confluence orchestration: structure, trend engine and EMA score composed
//! into one report per timeframe.

use serde::Serialize;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::EngineError;
use crate::indicators::{analyze_market_structure, SwingDetector, TrendEngine};
use crate::models::{
    Candle, Confidence, MarketBias, ScoreResult, StructureBias, StructureState, TrendReading,
};
use crate::signals::ema_score::{EmaScorer, TREND_INVALID};

impl From<StructureBias> for MarketBias {
    fn from(bias: StructureBias) -> Self {
        adapt_bias(bias)
    }
}

/// Explicit mapping from the structure vocabulary to the scorer vocabulary.
///
/// Both enums are matched exhaustively so a new variant on either side is a
/// compile error rather than a silent misclassification.
pub fn adapt_bias(bias: StructureBias) -> MarketBias {
    match bias {
        StructureBias::Bullish => MarketBias::Bullish,
        StructureBias::Bearish => MarketBias::Bearish,
        StructureBias::Transition => MarketBias::Transition,
        StructureBias::Range => MarketBias::Range,
    }
}

/// Report-level confidence; `None` when the trend engine had nothing to score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportConfidence {
    None,
    Weak,
    Moderate,
    Strong,
}

impl From<Confidence> for ReportConfidence {
    fn from(confidence: Confidence) -> Self {
        match confidence {
            Confidence::Weak => ReportConfidence::Weak,
            Confidence::Moderate => ReportConfidence::Moderate,
            Confidence::Strong => ReportConfidence::Strong,
        }
    }
}

/// State of reaction-zone integration in the aggregate score.
///
/// Zones are detected and scored separately (see `SignalEngine`) but do not
/// contribute to the confluence score yet; the orchestrator always reports
/// `NotWired` and scores the EMA with `in_zone = false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneIntegration {
    NotWired,
}

impl ZoneIntegration {
    fn in_zone(&self) -> bool {
        match self {
            ZoneIntegration::NotWired => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureSummary {
    pub bias: StructureBias,
    pub bos: bool,
    pub swing_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSummary {
    pub slope: &'static str,
    pub position: &'static str,
    pub rejection: &'static str,
}

impl TrendSummary {
    const UNAVAILABLE: &'static str = "n/a";

    fn from_reading(reading: &TrendReading) -> Self {
        match reading.state() {
            Some(state) => Self {
                slope: state.slope.as_str(),
                position: state.position.as_str(),
                rejection: state.rejection.as_str(),
            },
            None => Self {
                slope: Self::UNAVAILABLE,
                position: Self::UNAVAILABLE,
                rejection: Self::UNAVAILABLE,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfluenceScore {
    pub score: i32,
    pub confidence: ReportConfidence,
    pub reasons: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfluenceReport {
    pub timeframe: String,
    pub structure: StructureSummary,
    pub trend: TrendSummary,
    pub confluence: ConfluenceScore,
    pub zones: ZoneIntegration,
}

/// Report plus the intermediate results downstream stages need.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfluenceAnalysis {
    pub report: ConfluenceReport,
    pub structure: StructureState,
    pub market_bias: MarketBias,
    pub reading: TrendReading,
    /// `None` when the trend reading was invalid
    pub ema_score: Option<ScoreResult>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfluenceEngine {
    detector: SwingDetector,
    trend: TrendEngine,
    scorer: EmaScorer,
}

impl ConfluenceEngine {
    pub fn new(config: &AnalysisConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            detector: SwingDetector::new(config.pivot_window)?,
            trend: TrendEngine::new(config.trend)?,
            scorer: EmaScorer::default(),
        })
    }

    pub fn with_scorer(mut self, scorer: EmaScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn detector(&self) -> &SwingDetector {
        &self.detector
    }

    /// Run the full technical stack on one series.
    pub fn analyze(&self, candles: &[Candle], timeframe: &str) -> ConfluenceAnalysis {
        let structure = analyze_market_structure(candles, &self.detector);
        let market_bias = adapt_bias(structure.bias);
        let reading = self.trend.analyze(candles, market_bias);
        let zones = ZoneIntegration::NotWired;

        let ema_score = reading
            .is_valid()
            .then(|| self.scorer.score(&reading, market_bias, zones.in_zone()));

        let confluence = match &ema_score {
            Some(result) => ConfluenceScore {
                score: result.score,
                confidence: result.confidence.into(),
                reasons: result.reasons.clone(),
            },
            None => ConfluenceScore {
                score: 0,
                confidence: ReportConfidence::None,
                reasons: vec![TREND_INVALID],
            },
        };

        debug!(
            timeframe,
            bias = structure.bias.as_str(),
            score = confluence.score,
            "confluence report assembled"
        );

        let report = ConfluenceReport {
            timeframe: timeframe.to_string(),
            structure: StructureSummary {
                bias: structure.bias,
                bos: structure.bos,
                swing_count: structure.swings.len(),
            },
            trend: TrendSummary::from_reading(&reading),
            confluence,
            zones,
        };

        ConfluenceAnalysis {
            report,
            structure,
            market_bias,
            reading,
            ema_score,
        }
    }

    /// Convenience wrapper returning only the report
    pub fn analyze_timeframe(&self, candles: &[Candle], timeframe: &str) -> ConfluenceReport {
        self.analyze(candles, timeframe).report
    }
}

impl Default for ConfluenceEngine {
    fn default() -> Self {
        Self {
            detector: SwingDetector::default(),
            trend: TrendEngine::default(),
            scorer: EmaScorer::default(),
        }
    }
}
