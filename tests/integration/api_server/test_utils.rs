//! Test utilities for API server integration tests

use axum_test::TestServer;
use chrono::{Duration, TimeZone, Utc};
use fxchecklist::core::http::{create_router, AppState};
use fxchecklist::metrics::Metrics;
use fxchecklist::models::Candle;
use fxchecklist::signals::SignalEngine;
use std::sync::Arc;

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
}

impl TestApiServer {
    pub async fn new() -> Self {
        let state = AppState::new(SignalEngine::default()).expect("metrics initialization");
        let metrics = state.metrics.clone();

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self { server, metrics }
    }
}

/// Hourly bars climbing `step` per bar from 1.0, each opening at the previous close.
pub fn rising_candles(count: usize, step: f64) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let close = 1.0 + step * i as f64;
            let open = if i == 0 {
                close
            } else {
                1.0 + step * (i - 1) as f64
            };
            Candle::new(
                open,
                open.max(close) + 0.0005,
                open.min(close) - 0.0005,
                close,
                1000.0,
                start + Duration::hours(i as i64),
            )
        })
        .collect()
}
