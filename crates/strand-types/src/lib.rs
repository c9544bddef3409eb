//! # strand-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the Strand Cosserat-rod simulation engine.
//!
//! This crate has zero domain logic; it defines the vocabulary
//! that all other Strand crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{StrandError, StrandResult};
pub use ids::{BlockId, RigidBodyId, RodId};
pub use scalar::Scalar;
