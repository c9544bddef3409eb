//! Penalty contact parameters shared by every contact kernel.

use serde::{Deserialize, Serialize};
use strand_rod::RodTopology;
use strand_solver::{ContactConfig, SystemCollection};
use strand_types::{RodId, StrandError, StrandResult};

/// Stiffness, damping and friction of a contact pair.
///
/// Rod–rod and self-contact only use `k` and `nu`; the slip terms apply to
/// rod–rigid-body contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactParams {
    /// Penalty stiffness.
    pub k: f64,
    /// Normal damping.
    pub nu: f64,
    pub velocity_damping_coefficient: f64,
    pub friction_coefficient: f64,
}

impl ContactParams {
    /// Frictionless penalty contact.
    pub fn new(k: f64, nu: f64) -> Self {
        Self {
            k,
            nu,
            velocity_damping_coefficient: 0.0,
            friction_coefficient: 0.0,
        }
    }

    pub fn with_friction(mut self, velocity_damping_coefficient: f64, friction_coefficient: f64) -> Self {
        self.velocity_damping_coefficient = velocity_damping_coefficient;
        self.friction_coefficient = friction_coefficient;
        self
    }
}

impl Default for ContactParams {
    fn default() -> Self {
        ContactConfig::default().into()
    }
}

impl From<ContactConfig> for ContactParams {
    fn from(config: ContactConfig) -> Self {
        Self {
            k: config.k,
            nu: config.nu,
            velocity_damping_coefficient: config.velocity_damping_coefficient,
            friction_coefficient: config.friction_coefficient,
        }
    }
}

impl From<&ContactConfig> for ContactParams {
    fn from(config: &ContactConfig) -> Self {
        (*config).into()
    }
}

/// Contact kernels walk open element chains; rings are rejected.
pub(crate) fn ensure_straight(systems: &SystemCollection, rod: RodId) -> StrandResult<()> {
    let handle = systems.rod_handle(rod)?;
    if systems.blocks()[handle.block].topology() == RodTopology::Ring {
        return Err(StrandError::InvalidConfig(format!(
            "contact is not supported for ring rod {rod:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_copies_every_coefficient() {
        let config = ContactConfig {
            k: 2.0,
            nu: 3.0,
            velocity_damping_coefficient: 4.0,
            friction_coefficient: 0.5,
        };
        let params = ContactParams::from(&config);
        assert_eq!(params, ContactParams::new(2.0, 3.0).with_friction(4.0, 0.5));
    }
}
