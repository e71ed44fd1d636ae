//! Entry decision: a linear gate of hard filters, entry candle, volume and grading.

pub mod candle;
pub mod engine;
pub mod grade;
pub mod volume;

pub use candle::*;
pub use engine::*;
pub use grade::*;
pub use volume::*;
