//! Trend indicators: moving-average engine, coarse trend classification

pub mod classifier;
pub mod ema;

pub use classifier::*;
pub use ema::*;
