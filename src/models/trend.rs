use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slope {
    Up,
    Down,
    Flat,
}

impl Slope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slope::Up => "up",
            Slope::Down => "down",
            Slope::Flat => "flat",
        }
    }
}

/// Where the latest close sits relative to the moving average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricePosition {
    Above,
    Below,
    CrossUp,
    CrossDown,
    OnZone,
}

impl PricePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricePosition::Above => "above",
            PricePosition::Below => "below",
            PricePosition::CrossUp => "cross_up",
            PricePosition::CrossDown => "cross_down",
            PricePosition::OnZone => "on_zone",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    BullishRejection,
    BearishRejection,
    None,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::BullishRejection => "bullish_rejection",
            Rejection::BearishRejection => "bearish_rejection",
            Rejection::None => "none",
        }
    }

    pub fn is_some(&self) -> bool {
        !matches!(self, Rejection::None)
    }
}

/// Moving-average state of a valid trend reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendState {
    /// Moving average at the latest bar
    pub value: f64,
    /// Latest close
    pub price: f64,
    /// Volatility (mean true range) at the latest bar
    pub volatility: f64,
    pub slope: Slope,
    pub position: PricePosition,
    pub rejection: Rejection,
    /// (price - value) expressed in volatility units
    pub distance: f64,
}

/// Output of the trend engine. Too-short input is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrendReading {
    Valid(TrendState),
    Invalid { required: usize, actual: usize },
}

impl TrendReading {
    pub fn is_valid(&self) -> bool {
        matches!(self, TrendReading::Valid(_))
    }

    pub fn state(&self) -> Option<&TrendState> {
        match self {
            TrendReading::Valid(state) => Some(state),
            TrendReading::Invalid { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&'static str> {
        match self {
            TrendReading::Valid(_) => None,
            TrendReading::Invalid { .. } => Some("insufficient history"),
        }
    }
}

/// Coarse bias combining structure and moving-average state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendBias {
    Bullish,
    Bearish,
    Range,
    Transition,
}

impl TrendBias {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendBias::Bullish => "bullish",
            TrendBias::Bearish => "bearish",
            TrendBias::Range => "range",
            TrendBias::Transition => "transition",
        }
    }

    pub fn is_directional(&self) -> bool {
        matches!(self, TrendBias::Bullish | TrendBias::Bearish)
    }
}
