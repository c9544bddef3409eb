//! # strand-math
//!
//! Numeric primitives for the Strand rod engine.
//!
//! Provides:
//! - Re-exports of `glam` double-precision types (`DVec3`, `DMat3`)
//! - Trapezoidal quadrature and two-point difference kernels
//! - Batched element-wise linear algebra over `DVec3`/`DMat3` slices
//! - Exponential / logarithmic maps for director rotations

pub mod calculus;
pub mod linalg;
pub mod rotation;

pub use calculus::{difference, position_average, position_difference, quadrature, Batched};

// Re-export glam types as the canonical math types for Strand.
pub use glam::{DMat3, DVec3};
