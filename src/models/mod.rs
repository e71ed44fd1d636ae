//! Shared data models spanning the engine layers.

pub mod candle;
pub mod signal;
pub mod structure;
pub mod trend;
pub mod zone;

pub use candle::{validate_candles, Candle, Series};
pub use signal::{Confidence, MarketBias, ScoreResult};
pub use structure::{StructureBias, StructureState, SwingKind, SwingPoint};
pub use trend::{PricePosition, Rejection, Slope, TrendBias, TrendReading, TrendState};
pub use zone::{
    AoiKind, AoiSource, AoiZone, Reaction, ReactionStrength, ZoneEntry, ZoneId, ZoneLedger,
    ZoneView,
};
