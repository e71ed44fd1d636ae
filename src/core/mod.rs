//! HTTP surface of the signal engine

pub mod http;

pub use http::*;
