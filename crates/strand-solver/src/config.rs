//! Simulation configuration.
//!
//! Parameters that control a run: time span, step count, stepper choice,
//! gravity and contact penalty constants. Serializable to and from TOML.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use strand_types::constants::GRAVITY;
use strand_types::{StrandError, StrandResult};

/// Symplectic integrator selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepperKind {
    /// Second-order half-kick position Verlet.
    #[default]
    PositionVerlet,
    /// Fourth-order position-extended Forest-Ruth-like scheme.
    Pefrl,
}

/// Penalty contact constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Penalty stiffness `k`.
    pub k: f64,
    /// Normal damping `ν`.
    pub nu: f64,
    /// Slip velocity damping `c_v` (rod–rigid-body only).
    pub velocity_damping_coefficient: f64,
    /// Coulomb friction coefficient `μ` (rod–rigid-body only).
    pub friction_coefficient: f64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            k: 1.0e4,
            nu: 10.0,
            velocity_damping_coefficient: 0.0,
            friction_coefficient: 0.0,
        }
    }
}

/// Built-in scenarios runnable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Free V-shaped rod relaxing towards straight.
    #[default]
    Butterfly,
    /// Rod clamped at one end under gravity.
    Cantilever,
    /// Rod falling onto a fixed rigid cylinder.
    CylinderContact,
    /// Twisted rod buckling into a helix.
    HelicalBuckling,
}

impl ScenarioKind {
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::Butterfly,
            ScenarioKind::Cantilever,
            ScenarioKind::CylinderContact,
            ScenarioKind::HelicalBuckling,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Butterfly => "butterfly",
            ScenarioKind::Cantilever => "cantilever",
            ScenarioKind::CylinderContact => "cylinder_contact",
            ScenarioKind::HelicalBuckling => "helical_buckling",
        }
    }
}

/// Scenario selection for the command-line driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub kind: ScenarioKind,
    /// Elements per rod.
    pub n_elems: usize,
    /// Material preset name.
    pub material: String,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            kind: ScenarioKind::default(),
            n_elems: 4,
            material: "demo_elastic".into(),
        }
    }
}

/// Configuration of one integration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulated time span (seconds).
    pub final_time: f64,

    /// Number of fixed-size steps over `final_time`.
    pub total_steps: u64,

    pub stepper: StepperKind,

    /// Gravity vector [gx, gy, gz] in m/s².
    pub gravity: [f64; 3],

    #[serde(default)]
    pub contact: ContactConfig,

    #[serde(default)]
    pub scenario: ScenarioConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            final_time: 1.0,
            total_steps: 10_000,
            stepper: StepperKind::PositionVerlet,
            gravity: [0.0, 0.0, -GRAVITY],
            contact: ContactConfig::default(),
            scenario: ScenarioConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Short, coarse run for debugging.
    pub fn debug() -> Self {
        Self {
            final_time: 0.1,
            total_steps: 100,
            ..Default::default()
        }
    }

    /// Fourth-order stepper with a fine step.
    pub fn high_quality() -> Self {
        Self {
            total_steps: 100_000,
            stepper: StepperKind::Pefrl,
            ..Default::default()
        }
    }

    /// Fixed step size `final_time / total_steps`.
    pub fn dt(&self) -> f64 {
        self.final_time / self.total_steps as f64
    }

    pub fn gravity(&self) -> DVec3 {
        DVec3::from_array(self.gravity)
    }

    /// Rejects non-positive time spans and step counts, negative contact
    /// constants and empty scenarios.
    pub fn validate(&self) -> StrandResult<()> {
        if !self.final_time.is_finite() || self.final_time <= 0.0 {
            return Err(StrandError::InvalidConfig(format!(
                "final_time must be positive, got {}",
                self.final_time
            )));
        }
        if self.total_steps == 0 {
            return Err(StrandError::InvalidConfig("total_steps must be positive".into()));
        }
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(StrandError::InvalidConfig("gravity must be finite".into()));
        }
        let c = &self.contact;
        for (name, value) in [
            ("contact.k", c.k),
            ("contact.nu", c.nu),
            ("contact.velocity_damping_coefficient", c.velocity_damping_coefficient),
            ("contact.friction_coefficient", c.friction_coefficient),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(StrandError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if self.scenario.n_elems < 2 {
            return Err(StrandError::InvalidConfig(format!(
                "scenario needs at least 2 elements, got {}",
                self.scenario.n_elems
            )));
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> StrandResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| StrandError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> StrandResult<String> {
        toml::to_string(self).map_err(|e| StrandError::Serialization(e.to_string()))
    }
}
