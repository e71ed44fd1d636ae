//! Full signal pipeline: confluence report, zone scoring and the entry gate.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::entry::{EntryContext, EntryDecision, EntryEngine, EntryParams, VolumeParams};
use crate::error::EngineError;
use crate::indicators::levels::{
    detect_psych_levels, detect_session, near_psych_level, PsychLevel, TradingSession,
};
use crate::indicators::{classify_reading, AoiDetector, SwingRetestValidator};
use crate::models::{
    AoiKind, AoiSource, AoiZone, Confidence, Rejection, ScoreResult, Series, TrendBias, ZoneId,
    ZoneLedger,
};
use crate::signals::aoi_score::AoiScorer;
use crate::signals::confluence::{ConfluenceEngine, ConfluenceReport};

/// AOI score of one ledger zone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneScore {
    pub id: ZoneId,
    pub kind: AoiKind,
    pub source: AoiSource,
    pub high: f64,
    pub low: f64,
    pub contains_price: bool,
    pub score: ScoreResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalOutcome {
    pub report: ConfluenceReport,
    pub trend_bias: TrendBias,
    pub in_zone: bool,
    pub at_key_level: bool,
    pub zones: Vec<ZoneScore>,
    pub entry: EntryDecision,
    pub session: TradingSession,
    pub psych_levels: Vec<PsychLevel>,
}

/// Zones found on a higher-timeframe series and, optionally, refined on a
/// lower-timeframe one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ZoneScan {
    pub htf: Vec<AoiZone>,
    pub ltf: Vec<AoiZone>,
}

impl ZoneScan {
    /// Register every zone into `ledger`, returning the new handles.
    pub fn register(self, ledger: &mut ZoneLedger) -> Vec<ZoneId> {
        self.htf
            .into_iter()
            .chain(self.ltf)
            .map(|zone| ledger.register(zone))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalEngine {
    confluence: ConfluenceEngine,
    detector: AoiDetector,
    aoi_scorer: AoiScorer,
    entry: EntryEngine<SwingRetestValidator>,
    pip_size: f64,
    psych_radius_pips: f64,
}

impl SignalEngine {
    pub fn new(config: &AnalysisConfig) -> Result<Self, EngineError> {
        let confluence = ConfluenceEngine::new(config)?;
        let validator = SwingRetestValidator::new(
            *confluence.detector(),
            config.trend.volatility_period,
            config.trend.zone_buffer_factor,
        )?;
        let params = EntryParams {
            volume: VolumeParams {
                lookback: config.volume_lookback,
                ..VolumeParams::default()
            },
            ..EntryParams::default()
        };

        Ok(Self {
            confluence,
            detector: AoiDetector::new(config.aoi)?,
            aoi_scorer: AoiScorer::default(),
            entry: EntryEngine::with_validator(params, validator)?,
            pip_size: config.pip_size,
            psych_radius_pips: config.psych_radius_pips,
        })
    }

    pub fn confluence(&self) -> &ConfluenceEngine {
        &self.confluence
    }

    pub fn analyze(&self, series: &Series, timeframe: &str) -> ConfluenceReport {
        self.confluence.analyze_timeframe(series, timeframe)
    }

    pub fn detect_zones(
        &self,
        htf: &Series,
        htf_timeframe: &str,
        ltf: Option<(&Series, &str)>,
    ) -> ZoneScan {
        let htf_zones = self.detector.detect_htf(htf, htf_timeframe);
        let ltf_zones = match ltf {
            Some((series, timeframe)) => self.detector.detect_ltf(series, timeframe, &htf_zones),
            None => Vec::new(),
        };
        debug!(
            htf = htf_zones.len(),
            ltf = ltf_zones.len(),
            "zone scan complete"
        );
        ZoneScan {
            htf: htf_zones,
            ltf: ltf_zones,
        }
    }

    /// Run every stage on one series. The ledger is only read.
    pub fn evaluate(&self, series: &Series, timeframe: &str, ledger: &ZoneLedger) -> SignalOutcome {
        let analysis = self.confluence.analyze(series, timeframe);
        let trend_bias = classify_reading(analysis.structure.bias, &analysis.reading);
        let latest = series.latest();
        let price = latest.close;

        let rejection = analysis
            .reading
            .state()
            .map(|state| state.rejection)
            .filter(Rejection::is_some);

        let zones: Vec<ZoneScore> = ledger
            .iter()
            .map(|(id, view)| {
                let contains_price = view.zone.contains(price);
                let inside_rejection = rejection.filter(|_| contains_price);
                ZoneScore {
                    id,
                    kind: view.zone.kind,
                    source: view.zone.source,
                    high: view.zone.high,
                    low: view.zone.low,
                    contains_price,
                    score: self
                        .aoi_scorer
                        .score(view, analysis.market_bias, inside_rejection),
                }
            })
            .collect();

        let in_zone = zones.iter().any(|zone| zone.contains_price);
        let at_key_level = near_psych_level(price, self.pip_size, self.psych_radius_pips);

        let (ema_score, ema_confidence) = match &analysis.ema_score {
            Some(result) => (result.score, result.confidence),
            None => (0, Confidence::Weak),
        };

        let context = EntryContext {
            trend_bias,
            structure_bias: analysis.structure.bias,
            ema_confidence,
            ema_score,
            in_zone,
            at_key_level,
        };
        let entry = self.entry.evaluate(series, &context);

        info!(
            timeframe,
            trend = trend_bias.as_str(),
            decision = ?entry.decision,
            "signal evaluated"
        );

        SignalOutcome {
            report: analysis.report,
            trend_bias,
            in_zone,
            at_key_level,
            zones,
            entry,
            session: detect_session(latest.timestamp),
            psych_levels: detect_psych_levels(price, self.pip_size, self.psych_radius_pips),
        }
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self {
            confluence: ConfluenceEngine::default(),
            detector: AoiDetector::default(),
            aoi_scorer: AoiScorer::default(),
            entry: EntryEngine::default(),
            pip_size: AnalysisConfig::default().pip_size,
            psych_radius_pips: AnalysisConfig::default().psych_radius_pips,
        }
    }
}
