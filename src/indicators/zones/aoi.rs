//! Higher- and lower-timeframe reaction zone detection

use tracing::debug;

use crate::error::{ensure_factor, EngineError};
use crate::models::{AoiKind, AoiSource, AoiZone, Candle};

/// Bars skipped at each end of the series by the impulse scan
const HTF_EDGE_MARGIN: usize = 3;
/// Bars skipped at each end of a zone's overlapping-candle subset
const LTF_EDGE_MARGIN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AoiParams {
    /// Expansion body must be at least this multiple of the base body
    pub expansion_ratio: f64,
    /// Consolidation body must be below this fraction of its own range
    pub consolidation_ratio: f64,
}

impl Default for AoiParams {
    fn default() -> Self {
        Self {
            expansion_ratio: 1.5,
            consolidation_ratio: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AoiDetector {
    params: AoiParams,
}

impl AoiDetector {
    pub fn new(params: AoiParams) -> Result<Self, EngineError> {
        ensure_factor("expansion_ratio", params.expansion_ratio)?;
        ensure_factor("consolidation_ratio", params.consolidation_ratio)?;
        Ok(Self { params })
    }

    /// Impulse origins: a directional base bar followed by an opposite,
    /// larger-bodied expansion bar. The base bar's range becomes the zone;
    /// Demand after a bullish expansion, Supply after a bearish one.
    pub fn detect_htf(&self, candles: &[Candle], timeframe: &str) -> Vec<AoiZone> {
        let mut zones = Vec::new();
        let end = candles.len().saturating_sub(HTF_EDGE_MARGIN);

        for i in HTF_EDGE_MARGIN..end {
            let base = &candles[i];
            let expansion = &candles[i + 1];
            let strong = expansion.body() >= base.body() * self.params.expansion_ratio;

            let kind = if base.is_bearish() && expansion.is_bullish() && strong {
                AoiKind::Demand
            } else if base.is_bullish() && expansion.is_bearish() && strong {
                AoiKind::Supply
            } else {
                continue;
            };

            zones.push(build_zone(kind, AoiSource::Htf, base, timeframe, i));
        }

        debug!(timeframe, zones = zones.len(), "htf zones detected");
        zones
    }

    /// Consolidation bars inside each HTF zone. Only candles whose range
    /// overlaps the zone are considered; each LTF zone inherits its parent's kind.
    pub fn detect_ltf(
        &self,
        candles: &[Candle],
        timeframe: &str,
        htf_zones: &[AoiZone],
    ) -> Vec<AoiZone> {
        let mut zones = Vec::new();

        for parent in htf_zones {
            let inside: Vec<(usize, &Candle)> = candles
                .iter()
                .enumerate()
                .filter(|(_, c)| c.overlaps(parent.low, parent.high))
                .collect();

            let end = inside.len().saturating_sub(LTF_EDGE_MARGIN);
            for &(index, candle) in inside.iter().take(end).skip(LTF_EDGE_MARGIN) {
                if candle.body() < candle.range() * self.params.consolidation_ratio {
                    zones.push(build_zone(parent.kind, AoiSource::Ltf, candle, timeframe, index));
                }
            }
        }

        debug!(
            timeframe,
            parents = htf_zones.len(),
            zones = zones.len(),
            "ltf zones detected"
        );
        zones
    }
}

fn build_zone(
    kind: AoiKind,
    source: AoiSource,
    candle: &Candle,
    timeframe: &str,
    origin: usize,
) -> AoiZone {
    AoiZone {
        kind,
        source,
        high: candle.high,
        low: candle.low,
        timeframe: timeframe.to_string(),
        origin,
    }
}
