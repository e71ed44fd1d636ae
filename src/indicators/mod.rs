//! Technical analysis stages, leaves of the pipeline.

pub mod levels;
pub mod structure;
pub mod trend;
pub mod volatility;
pub mod zones;

pub use structure::{
    analyze_market_structure, classify_structure, detect_bos, BreakRetestValidator,
    RetestStatus, SwingDetector, SwingRetestValidator,
};
pub use trend::{classify_reading, classify_trend, TrendEngine, TrendParams};
pub use zones::{AoiDetector, AoiParams};
