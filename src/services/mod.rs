//! External collaborators the pipeline consumes.

pub mod market_data;

pub use market_data::*;
