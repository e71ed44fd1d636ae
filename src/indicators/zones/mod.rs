//! Reaction zones (areas of interest)

pub mod aoi;

pub use aoi::*;
