//! Integration tests for strand-telemetry.

use strand_telemetry::bus::EventBus;
use strand_telemetry::events::{EventKind, SimulationEvent};
use strand_telemetry::sinks::{EventSink, TracingSink, VecSink};

#[test]
fn emit_and_flush_in_order() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));

    bus.emit(SimulationEvent::new(0, EventKind::StepBegin { time: 0.0 }));
    bus.emit(SimulationEvent::new(0, EventKind::StepEnd { time: 0.01, wall_time: 1e-4 }));
    assert!(sink.is_empty(), "nothing reaches sinks before flush");

    assert_eq!(bus.flush(), 2);
    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].name(), "step_begin");
    assert_eq!(events[1].name(), "step_end");
}

#[test]
fn disabled_bus_drops_events() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));
    bus.set_enabled(false);
    bus.emit(SimulationEvent::new(0, EventKind::StepBegin { time: 0.0 }));
    assert_eq!(bus.flush(), 0);
    assert!(sink.is_empty());
}

#[test]
fn every_sink_receives_every_event() {
    let mut bus = EventBus::new();
    let a = VecSink::new();
    let b = VecSink::new();
    bus.add_sink(Box::new(a.clone()));
    bus.add_sink(Box::new(b.clone()));
    bus.add_sink(Box::new(TracingSink::default()));
    assert_eq!(bus.sink_count(), 3);

    bus.emit(SimulationEvent::new(
        4,
        EventKind::RunAborted {
            last_valid_step: 3,
            reason: "element length is 0".into(),
        },
    ));
    bus.finish();
    assert_eq!(a.events(), b.events());
    assert_eq!(a.len(), 1);
}

#[test]
fn event_serialization() {
    let event = SimulationEvent::new(
        5,
        EventKind::Energy {
            kinetic: 1.0,
            bending: 2.0,
            shear: 0.5,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    let recovered: SimulationEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, event);
}

#[test]
fn contact_pass_event() {
    let event = SimulationEvent::new(
        10,
        EventKind::ContactPass {
            contributor: "rod_cylinder".into(),
            pairs_in_contact: 2,
            max_penetration: 1e-3,
            total_force: 0.5,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("pairs_in_contact"));
    assert_eq!(event.name(), "contact_pass");
}

#[test]
fn tracing_sink_handles_all_levels() {
    for level in [tracing::Level::INFO, tracing::Level::DEBUG, tracing::Level::TRACE] {
        let mut sink = TracingSink::new(level);
        sink.handle(&SimulationEvent::new(
            0,
            EventKind::Custom {
                label: "probe".into(),
                payload: "{}".into(),
            },
        ));
        assert_eq!(sink.level(), level);
    }
}

#[test]
fn emitter_feeds_owning_bus() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));
    let emitter = bus.emitter();
    let clone = emitter.clone();
    emitter.emit(SimulationEvent::new(1, EventKind::StepBegin { time: 0.1 }));
    clone.emit(SimulationEvent::new(2, EventKind::StepBegin { time: 0.2 }));
    bus.flush();
    let steps: Vec<u64> = sink.events().iter().map(|e| e.step).collect();
    assert_eq!(steps, vec![1, 2]);
}
