//! Trading session by UTC hour

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradingSession {
    Asia,
    London,
    NewYork,
    DeadZone,
}

/// Asia 00-07, London 07-13, New York 13-20, dead zone otherwise
pub fn detect_session(timestamp: DateTime<Utc>) -> TradingSession {
    match timestamp.hour() {
        0..=6 => TradingSession::Asia,
        7..=12 => TradingSession::London,
        13..=19 => TradingSession::NewYork,
        _ => TradingSession::DeadZone,
    }
}
