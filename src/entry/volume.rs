//! Volume confirmation against a rolling average

use serde::{Deserialize, Serialize};

use crate::common::math;
use crate::models::Candle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeState {
    High,
    Normal,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeParams {
    pub lookback: usize,
    /// Multiple of the average a momentum entry needs for `High`
    pub momentum_ratio: f64,
    /// Multiple of the average any other entry needs for `Normal`
    pub normal_ratio: f64,
}

impl Default for VolumeParams {
    fn default() -> Self {
        Self {
            lookback: 20,
            momentum_ratio: 1.4,
            normal_ratio: 1.1,
        }
    }
}

/// Latest volume against the mean of the last `lookback` bars (including the
/// latest). Without a full window the average is undefined and the result is `Low`.
pub fn evaluate_volume(candles: &[Candle], params: &VolumeParams, momentum: bool) -> VolumeState {
    let Some(latest) = candles.last() else {
        return VolumeState::Low;
    };
    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();
    let Some(average) = math::sma(&volumes, params.lookback) else {
        return VolumeState::Low;
    };

    if momentum {
        if latest.volume > average * params.momentum_ratio {
            VolumeState::High
        } else {
            VolumeState::Low
        }
    } else if latest.volume > average * params.normal_ratio {
        VolumeState::Normal
    } else {
        VolumeState::Low
    }
}
