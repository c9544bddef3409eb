//! Integration tests for strand-types.

use strand_types::{BlockId, RigidBodyId, RodId, StrandError};

// ─── ID Tests ──────────────────────────────────────────────────

#[test]
fn rod_id_index() {
    let id = RodId(42);
    assert_eq!(id.index(), 42);
}

#[test]
fn block_id_index() {
    let id = BlockId::from(3u16);
    assert_eq!(id.index(), 3);
}

#[test]
fn ids_are_serializable() {
    let id = RigidBodyId(100);
    let json = serde_json::to_string(&id).unwrap();
    let deserialized: RigidBodyId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, deserialized);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn shape_error_display() {
    let err = StrandError::shape("quadrature output", 11, 10);
    let msg = err.to_string();
    assert!(msg.contains("quadrature output"));
    assert!(msg.contains("11"));
}

#[test]
fn physical_state_is_recoverable() {
    let err = StrandError::physical(2, 7, "zero element length");
    assert!(err.is_recoverable());
    assert!(err.to_string().contains("rod 2"));
}

#[test]
fn packing_is_fatal() {
    let err = StrandError::Packing("ring rod in straight block".into());
    assert!(!err.is_recoverable());
}

#[test]
fn integration_error_wraps_source() {
    let err = StrandError::Integration {
        last_valid_step: 41,
        source: Box::new(StrandError::physical(0, 3, "zero element length")),
    };
    assert!(err.is_recoverable());
    let msg = err.to_string();
    assert!(msg.contains("41"));
    assert!(msg.contains("zero element length"));
}
