use super::ZeroRng;
use crate::net::{Attempt, AttemptId, EndpointId, Frame, Medium};
use crate::sim::{Engine, SimTime, Workload};
use crate::topo::bus::build_bus;
use crate::viz::{VizEventKind, VizLogger};
use serde_json::Value;

fn colliding_pair() -> Engine<ZeroRng> {
    let endpoints = build_bus(&[(-200, 1), (200, 0)]);
    let attempts = vec![
        Attempt::new(AttemptId(0), EndpointId(0), EndpointId(1), Frame::new(64), SimTime(0)),
        Attempt::new(AttemptId(1), EndpointId(1), EndpointId(0), Frame::new(64), SimTime(0)),
    ];
    let workload = Workload::new(endpoints, attempts).expect("valid workload");
    Engine::new(Medium::new(10_000_000, 512), workload, ZeroRng)
}

#[test]
fn viz_meta_describes_endpoints_and_medium() {
    let mut engine = colliding_pair();
    engine.viz = Some(VizLogger::default());
    engine.emit_viz_meta();

    let events = &engine.viz.as_ref().expect("viz enabled").events;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].t, 0);
    match &events[0].kind {
        VizEventKind::Meta {
            endpoints,
            bit_rate_bps,
            slot_bits,
        } => {
            assert_eq!(endpoints.len(), 2);
            assert_eq!(endpoints[0].position_m, -200);
            assert_eq!(endpoints[0].peer, 1);
            assert_eq!(endpoints[1].mac, "02:00:00:00:00:01");
            assert_eq!(*bit_rate_bps, 10_000_000);
            assert_eq!(*slot_bits, 512);
        }
        _ => panic!("expected Meta event"),
    }
}

#[test]
fn viz_is_silent_when_disabled() {
    let mut engine = colliding_pair();
    engine.emit_viz_meta();
    engine.run();
    assert!(engine.viz.is_none());
}

#[test]
fn viz_records_admissions_collisions_and_backoff() {
    let mut engine = colliding_pair();
    engine.viz = Some(VizLogger::default());
    engine.emit_viz_meta();
    engine.run_until(SimTime(2));

    let events = &engine.viz.as_ref().expect("viz enabled").events;
    let kinds = events
        .iter()
        .map(|e| match e.kind {
            VizEventKind::Meta { .. } => "meta",
            VizEventKind::Admit => "admit",
            VizEventKind::Complete { .. } => "complete",
            VizEventKind::Collision { .. } => "collision",
            VizEventKind::Backoff { .. } => "backoff",
            VizEventKind::Drop { .. } => "drop",
        })
        .collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec!["meta", "admit", "admit", "collision", "backoff", "backoff"]
    );
    assert_eq!(events[3].t, 1);
    assert!(matches!(events[3].kind, VizEventKind::Collision { on_wire: 2 }));

    let raw = serde_json::to_string(events).expect("serialize viz");
    let v: Value = serde_json::from_str(&raw).expect("parse viz");
    let arr = v.as_array().expect("array");
    assert_eq!(arr[0].get("kind").and_then(|k| k.as_str()), Some("meta"));
    assert_eq!(arr[1].get("kind").and_then(|k| k.as_str()), Some("admit"));
    assert_eq!(arr[1].get("attempt_id").and_then(|k| k.as_u64()), Some(0));
    assert!(arr[3].get("attempt_id").is_none());
}
