//! Parallel analysis of independent series

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::models::{Series, ZoneLedger};
use crate::signals::engine::{SignalEngine, SignalOutcome};

/// One symbol/timeframe to analyse, with the caller's zone ledger for it.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub symbol: String,
    pub timeframe: String,
    pub series: Series,
    pub ledger: ZoneLedger,
}

impl BatchJob {
    pub fn new(symbol: impl Into<String>, timeframe: impl Into<String>, series: Series) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            series,
            ledger: ZoneLedger::new(),
        }
    }

    pub fn with_ledger(mut self, ledger: ZoneLedger) -> Self {
        self.ledger = ledger;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub symbol: String,
    pub timeframe: String,
    pub outcome: SignalOutcome,
}

/// Evaluate every job on the rayon pool. Results keep the order of `jobs`.
pub fn analyze_batch(engine: &SignalEngine, jobs: &[BatchJob]) -> Vec<BatchResult> {
    debug!(jobs = jobs.len(), "batch analysis started");
    jobs.par_iter()
        .map(|job| BatchResult {
            symbol: job.symbol.clone(),
            timeframe: job.timeframe.clone(),
            outcome: engine.evaluate(&job.series, &job.timeframe, &job.ledger),
        })
        .collect()
}
