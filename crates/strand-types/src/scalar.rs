//! Scalar type alias for the simulation.
//!
//! Rod kernels are validated against literal fixtures at `1e-6` absolute
//! tolerance and integrate stiff penalty springs, so the engine runs in
//! double precision.

/// The floating-point type used throughout the simulation.
pub type Scalar = f64;
