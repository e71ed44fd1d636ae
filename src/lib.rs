//! Multi-stage technical analysis turning OHLCV series into graded entry decisions.

pub mod common;
pub mod config;
pub mod core;
pub mod entry;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;

pub use error::EngineError;
pub use models::{Candle, Series, ZoneLedger};
pub use signals::{SignalEngine, SignalOutcome};
