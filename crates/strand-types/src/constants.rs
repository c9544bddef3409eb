//! Physical constants and simulation defaults.

use crate::Scalar;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: Scalar = 9.81;

/// Shear correction factor for circular cross-sections
/// (Kaneko 1975, best fit for Poisson ratio 0.5).
pub const SHEAR_CORRECTION_FACTOR: Scalar = 4.0 / 3.0;

/// Penetration below which a contact pair is still evaluated (negative gap).
pub const CONTACT_GAP_TOLERANCE: Scalar = 1.0e-5;

/// Relative tolerance for treating two segments as parallel.
pub const PARALLEL_TOLERANCE: Scalar = 1.0e-6;

/// Regularization added to a rotation angle before normalizing its axis.
pub const ROTATION_LOG_EPSILON: Scalar = 1.0e-14;

/// Regularization added to slip speeds before normalizing.
pub const SLIP_EPSILON: Scalar = 1.0e-14;

/// Position Verlet default: fraction of rest element length used as `dt`.
pub const DEFAULT_DT_PER_LENGTH: Scalar = 1.0e-3;
