//! Reaction zones and the caller-owned ledger of their touch history.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AoiKind {
    Demand,
    Supply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AoiSource {
    Htf,
    Ltf,
}

/// An immutable price band produced by the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AoiZone {
    pub kind: AoiKind,
    pub source: AoiSource,
    pub high: f64,
    pub low: f64,
    pub timeframe: String,
    /// Position of the candle the zone was built from
    pub origin: usize,
}

impl AoiZone {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.low && price <= self.high
    }

    /// A usable band is finite with `high >= low`.
    pub fn validate(&self) -> Result<(), String> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(format!("non-finite band [{}, {}]", self.low, self.high));
        }
        if self.high < self.low {
            return Err(format!("high {} below low {}", self.high, self.low));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionStrength {
    Strong,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub strength: ReactionStrength,
}

/// Handle into a [`ZoneLedger`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneId(pub usize);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneEntry {
    pub zone: AoiZone,
    #[serde(default)]
    pub touches: u32,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

/// Read-only view of a zone together with its history, handed to scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneView<'a> {
    pub zone: &'a AoiZone,
    pub touches: u32,
    pub reactions: &'a [Reaction],
}

impl<'a> From<&'a ZoneEntry> for ZoneView<'a> {
    fn from(entry: &'a ZoneEntry) -> Self {
        Self {
            zone: &entry.zone,
            touches: entry.touches,
            reactions: &entry.reactions,
        }
    }
}

/// Arena of zones whose touch counts and reactions outlive a single analysis call.
///
/// Owned and mutated by the caller only; the engine receives `&ZoneLedger`.
/// Deserialising validates every zone band.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ZoneEntry>", into = "Vec<ZoneEntry>")]
pub struct ZoneLedger {
    entries: Vec<ZoneEntry>,
}

impl ZoneLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted entries, rejecting malformed bands.
    pub fn from_entries(entries: Vec<ZoneEntry>) -> Result<Self, EngineError> {
        for (index, entry) in entries.iter().enumerate() {
            entry
                .zone
                .validate()
                .map_err(|reason| EngineError::InvalidZone { index, reason })?;
        }
        Ok(Self { entries })
    }

    /// Add a freshly detected zone with no touches and no reactions.
    pub fn register(&mut self, zone: AoiZone) -> ZoneId {
        self.entries.push(ZoneEntry {
            zone,
            touches: 0,
            reactions: Vec::new(),
        });
        ZoneId(self.entries.len() - 1)
    }

    pub fn record_touch(&mut self, id: ZoneId) -> bool {
        match self.entries.get_mut(id.0) {
            Some(entry) => {
                entry.touches += 1;
                true
            }
            None => false,
        }
    }

    pub fn record_reaction(&mut self, id: ZoneId, strength: ReactionStrength) -> bool {
        match self.entries.get_mut(id.0) {
            Some(entry) => {
                entry.reactions.push(Reaction { strength });
                true
            }
            None => false,
        }
    }

    pub fn view(&self, id: ZoneId) -> Option<ZoneView<'_>> {
        self.entries.get(id.0).map(ZoneView::from)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, ZoneView<'_>)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (ZoneId(i), ZoneView::from(entry)))
    }

    /// Zones whose band contains `price`
    pub fn containing(&self, price: f64) -> impl Iterator<Item = (ZoneId, ZoneView<'_>)> {
        self.iter().filter(move |(_, view)| view.zone.contains(price))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<ZoneEntry>> for ZoneLedger {
    type Error = EngineError;

    fn try_from(entries: Vec<ZoneEntry>) -> Result<Self, Self::Error> {
        ZoneLedger::from_entries(entries)
    }
}

impl From<ZoneLedger> for Vec<ZoneEntry> {
    fn from(ledger: ZoneLedger) -> Self {
        ledger.entries
    }
}
