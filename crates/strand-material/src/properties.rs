//! Bulk material properties of an elastic rod.

use serde::{Deserialize, Serialize};
use strand_types::{StrandError, StrandResult};

/// Physical properties of a rod material.
///
/// | Quantity | Field | Unit |
/// |---|---|---|
/// | Mass density | `density` | kg/m³ |
/// | Young's modulus | `youngs_modulus` | Pa |
/// | Poisson ratio | `poisson_ratio` | - |
/// | Viscous damping | `damping` | 1/s per unit length |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RodMaterial {
    /// Human-readable preset name (e.g., "steel").
    pub name: String,

    /// Volumetric mass density.
    pub density: f64,

    /// Young's modulus. Sets stretch and bending stiffness.
    pub youngs_modulus: f64,

    /// Poisson ratio. Sets the shear modulus through `E / (2 (1 + ν))`.
    pub poisson_ratio: f64,

    /// Dissipation constant `nu` applied to node velocities and element
    /// angular velocities. Zero disables damping.
    #[serde(default)]
    pub damping: f64,
}

impl RodMaterial {
    /// Creates a material with the given name and moduli and no damping.
    pub fn new(name: impl Into<String>, density: f64, youngs_modulus: f64, poisson_ratio: f64) -> Self {
        Self {
            name: name.into(),
            density,
            youngs_modulus,
            poisson_ratio,
            damping: 0.0,
        }
    }

    /// Returns a copy with the damping constant replaced.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Shear modulus `G = E / (2 (1 + ν))`.
    pub fn shear_modulus(&self) -> f64 {
        self.youngs_modulus / (2.0 * (1.0 + self.poisson_ratio))
    }

    /// Mass per unit length of a circular cross-section of `radius`.
    pub fn linear_density(&self, radius: f64) -> f64 {
        self.density * std::f64::consts::PI * radius * radius
    }

    /// Checks that all quantities are finite and physically meaningful.
    pub fn validate(&self) -> StrandResult<()> {
        let fields = [
            ("density", self.density),
            ("youngs_modulus", self.youngs_modulus),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(StrandError::InvalidConfig(format!(
                    "material '{}': {field} must be positive and finite, got {value}",
                    self.name
                )));
            }
        }
        if !self.poisson_ratio.is_finite() || self.poisson_ratio <= -1.0 {
            return Err(StrandError::InvalidConfig(format!(
                "material '{}': poisson_ratio must be greater than -1, got {}",
                self.name, self.poisson_ratio
            )));
        }
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(StrandError::InvalidConfig(format!(
                "material '{}': damping must be non-negative, got {}",
                self.name, self.damping
            )));
        }
        Ok(())
    }
}
