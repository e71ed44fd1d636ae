//! Scoring, confluence and the end-to-end signal pipeline.

pub mod aoi_score;
pub mod batch;
pub mod confluence;
pub mod ema_score;
pub mod engine;
pub mod weights;

pub use aoi_score::*;
pub use batch::*;
pub use confluence::*;
pub use ema_score::*;
pub use engine::*;
pub use weights::*;
