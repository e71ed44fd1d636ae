//! Market structure: swing pivots, structure bias, break of structure and retests

pub mod break_retest;
pub mod market_structure;
pub mod swings;

pub use break_retest::*;
pub use market_structure::*;
pub use swings::*;
