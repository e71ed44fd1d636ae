//! HTTP endpoint server using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::config::Config;
use crate::metrics::Metrics;
use crate::models::{Series, ZoneLedger};
use crate::signals::{ConfluenceReport, SignalEngine, SignalOutcome, ZoneScan};

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub engine: Arc<SignalEngine>,
}

impl AppState {
    pub fn new(engine: SignalEngine) -> Result<Self, prometheus::Error> {
        Ok(Self {
            metrics: Arc::new(Metrics::new()?),
            start_time: Arc::new(Instant::now()),
            engine: Arc::new(engine),
        })
    }
}

/// Liveness and uptime
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": "healthy",
        "uptime_seconds": uptime_seconds,
        "service": "fxchecklist-signal-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Series are validated while deserialising; malformed candles are rejected
/// by the `Json` extractor before a handler runs.
#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    timeframe: String,
    candles: Series,
}

#[derive(Debug, Deserialize)]
struct SignalRequest {
    timeframe: String,
    candles: Series,
    #[serde(default)]
    zones: ZoneLedger,
}

#[derive(Debug, Deserialize)]
struct TimeframeSeries {
    timeframe: String,
    candles: Series,
}

#[derive(Debug, Deserialize)]
struct ZonesRequest {
    htf: TimeframeSeries,
    ltf: Option<TimeframeSeries>,
}

/// Confluence report for one series
async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<ConfluenceReport> {
    Json(state.engine.analyze(&request.candles, &request.timeframe))
}

/// Full pipeline including the entry decision
async fn signal(
    State(state): State<AppState>,
    Json(request): Json<SignalRequest>,
) -> Json<SignalOutcome> {
    let outcome = state
        .engine
        .evaluate(&request.candles, &request.timeframe, &request.zones);
    state
        .metrics
        .decisions_total
        .with_label_values(&[outcome.entry.decision.as_str()])
        .inc();
    Json(outcome)
}

async fn zones(State(state): State<AppState>, Json(request): Json<ZonesRequest>) -> Json<ZoneScan> {
    let ltf = request
        .ltf
        .as_ref()
        .map(|ltf| (&ltf.candles, ltf.timeframe.as_str()));
    Json(
        state
            .engine
            .detect_zones(&request.htf.candles, &request.htf.timeframe, ltf),
    )
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/analyze", post(analyze))
        .route("/api/signal", post(signal))
        .route("/api/zones", post(zones))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let engine = SignalEngine::new(&config.analysis)?;
    let state = AppState::new(engine)?;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
