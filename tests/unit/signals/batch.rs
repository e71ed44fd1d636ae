//! Unit tests for parallel batch analysis

use fxchecklist::models::ZoneLedger;
use fxchecklist::signals::{analyze_batch, BatchJob, SignalEngine};

use crate::fixtures::{flat_bars, random_walk, rising, series, trending_bars};

#[test]
fn batch_matches_sequential_evaluation_in_order() {
    let engine = SignalEngine::default();
    let jobs = vec![
        BatchJob::new("EURUSD", "H1", series(trending_bars(&rising(120, 1.0, 0.001), 0.0005))),
        BatchJob::new("GBPUSD", "H4", series(trending_bars(&random_walk(200, 3), 0.0003))),
        BatchJob::new("USDJPY", "D1", series(flat_bars(&[150.0; 80], 0.05))),
    ];

    let results = analyze_batch(&engine, &jobs);
    assert_eq!(results.len(), jobs.len());
    for (job, result) in jobs.iter().zip(&results) {
        assert_eq!(result.symbol, job.symbol);
        assert_eq!(result.timeframe, job.timeframe);
        assert_eq!(
            result.outcome,
            engine.evaluate(&job.series, &job.timeframe, &ZoneLedger::new())
        );
    }
}

#[test]
fn empty_batch_is_empty() {
    assert!(analyze_batch(&SignalEngine::default(), &[]).is_empty());
}
