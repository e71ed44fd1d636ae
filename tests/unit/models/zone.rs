//! Unit tests for the zone ledger

use fxchecklist::models::{
    AoiKind, AoiSource, AoiZone, ReactionStrength, ZoneEntry, ZoneId, ZoneLedger,
};
use fxchecklist::EngineError;

pub fn zone(kind: AoiKind, source: AoiSource, low: f64, high: f64) -> AoiZone {
    AoiZone {
        kind,
        source,
        high,
        low,
        timeframe: "H4".to_string(),
        origin: 0,
    }
}

#[test]
fn registered_zone_starts_fresh() {
    let mut ledger = ZoneLedger::new();
    let id = ledger.register(zone(AoiKind::Demand, AoiSource::Htf, 1.0, 1.1));
    let view = ledger.view(id).unwrap();
    assert_eq!(view.touches, 0);
    assert!(view.reactions.is_empty());
    assert_eq!(ledger.len(), 1);
}

#[test]
fn touches_and_reactions_accumulate() {
    let mut ledger = ZoneLedger::new();
    let id = ledger.register(zone(AoiKind::Supply, AoiSource::Ltf, 1.2, 1.3));
    assert!(ledger.record_touch(id));
    assert!(ledger.record_touch(id));
    assert!(ledger.record_reaction(id, ReactionStrength::Strong));

    let view = ledger.view(id).unwrap();
    assert_eq!(view.touches, 2);
    assert_eq!(view.reactions.len(), 1);
}

#[test]
fn unknown_handle_is_ignored() {
    let mut ledger = ZoneLedger::new();
    assert!(!ledger.record_touch(ZoneId(3)));
    assert!(!ledger.record_reaction(ZoneId(3), ReactionStrength::Weak));
    assert!(ledger.view(ZoneId(3)).is_none());
}

#[test]
fn containing_filters_by_band() {
    let mut ledger = ZoneLedger::new();
    let low = ledger.register(zone(AoiKind::Demand, AoiSource::Htf, 1.0, 1.1));
    ledger.register(zone(AoiKind::Supply, AoiSource::Htf, 1.3, 1.4));

    let hits: Vec<ZoneId> = ledger.containing(1.05).map(|(id, _)| id).collect();
    assert_eq!(hits, vec![low]);
    assert_eq!(ledger.containing(1.2).count(), 0);
}

#[test]
fn ledger_deserializes_with_default_history() {
    let ledger: ZoneLedger = serde_json::from_value(serde_json::json!([
        {"zone": {"kind": "demand", "source": "htf", "high": 1.1, "low": 1.0, "timeframe": "D1", "origin": 4}}
    ]))
    .unwrap();
    let view = ledger.view(ZoneId(0)).unwrap();
    assert_eq!(view.touches, 0);
    assert_eq!(view.zone.kind, AoiKind::Demand);
}

#[test]
fn inverted_band_is_rejected_on_load() {
    let result = serde_json::from_value::<ZoneLedger>(serde_json::json!([
        {"zone": {"kind": "demand", "source": "htf", "high": 1.1, "low": 1.0, "timeframe": "D1", "origin": 4}},
        {"zone": {"kind": "demand", "source": "htf", "high": 1.0, "low": 1.2, "timeframe": "D1", "origin": 9}}
    ]));
    assert!(result.is_err());

    let entries = vec![ZoneEntry {
        zone: zone(AoiKind::Supply, AoiSource::Ltf, 1.2, 1.0),
        touches: 0,
        reactions: Vec::new(),
    }];
    assert!(matches!(
        ZoneLedger::from_entries(entries),
        Err(EngineError::InvalidZone { index: 0, .. })
    ));
}

#[test]
fn non_finite_band_is_rejected() {
    assert!(zone(AoiKind::Demand, AoiSource::Htf, f64::NAN, 1.1)
        .validate()
        .is_err());
    assert!(zone(AoiKind::Demand, AoiSource::Htf, 1.0, f64::INFINITY)
        .validate()
        .is_err());
    // a single-price band is allowed
    assert!(zone(AoiKind::Demand, AoiSource::Htf, 1.0, 1.0).validate().is_ok());
}

#[test]
fn ledger_round_trips_through_json() {
    let mut ledger = ZoneLedger::new();
    let id = ledger.register(zone(AoiKind::Demand, AoiSource::Htf, 1.0, 1.1));
    ledger.record_touch(id);
    let json = serde_json::to_string(&ledger).unwrap();
    let restored: ZoneLedger = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, ledger);
}
