//! Key price levels and market sessions

pub mod psych;
pub mod session;

pub use psych::*;
pub use session::*;
