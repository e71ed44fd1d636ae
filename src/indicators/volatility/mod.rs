//! Volatility indicators: mean true range

pub mod atr;

pub use atr::*;
