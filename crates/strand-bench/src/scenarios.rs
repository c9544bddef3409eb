//! Benchmark scenarios: rods, rigid bodies, loads and boundary conditions
//! assembled into a ready-to-run simulator.
//!
//! Four canonical scenarios:
//! 1. **Butterfly**: free V-shaped rod oscillating about straight
//! 2. **Cantilever**: rod clamped at one end, sagging under gravity
//! 3. **Cylinder contact**: rod dropped onto a fixed cylinder
//! 4. **Helical buckling**: ends pulled together and twisted until the rod
//!    buckles into a helix

use glam::{DMat3, DVec3};
use strand_contact::{ContactParams, RodCylinderContact};
use strand_material::{MaterialDatabase, RodMaterial};
use strand_rod::generators::{straight_rod, straight_rod_from_positions, RodGeometry};
use strand_rod::Cylinder;
use strand_solver::{
    stepper_for, ContactConfig, FixedRigidBody, GravityForces, HelicalBucklingBC, OneEndFixedRod,
    ScenarioKind, SimulationConfig, Simulator, StepperKind, SystemCollection,
};
use strand_types::constants::DEFAULT_DT_PER_LENGTH;
use strand_types::{RodId, StrandError, StrandResult};

/// A fully assembled benchmark scenario.
#[derive(Debug)]
pub struct Scenario {
    pub kind: ScenarioKind,
    /// Simulator with every load and constraint registered.
    pub simulator: Simulator,
    /// Rod whose centerline the metrics report.
    pub rod: RodId,
    pub n_elems: usize,
    /// Simulated time span (seconds).
    pub final_time: f64,
    /// Number of fixed steps over `final_time`.
    pub total_steps: u64,
}

/// Steps of size `dt` needed to cover `final_time`.
fn steps_for(final_time: f64, dt: f64) -> u64 {
    (final_time / dt).round().max(1.0) as u64
}

impl Scenario {
    /// Builds `kind` at its native duration and step size.
    pub fn build(
        kind: ScenarioKind,
        n_elems: usize,
        material: &RodMaterial,
        contact: &ContactConfig,
        gravity: DVec3,
    ) -> StrandResult<Self> {
        match kind {
            ScenarioKind::Butterfly => Self::butterfly(n_elems),
            ScenarioKind::Cantilever => Self::cantilever(n_elems, material, gravity),
            ScenarioKind::CylinderContact => Self::cylinder_contact(n_elems, material, contact, gravity),
            ScenarioKind::HelicalBuckling => Self::helical_buckling(n_elems),
        }
    }

    /// Builds the scenario a configuration selects, over the configuration's
    /// time span, step count and stepper.
    pub fn from_config(config: &SimulationConfig) -> StrandResult<Self> {
        config.validate()?;
        let database = MaterialDatabase::with_defaults();
        let material = database.get(&config.scenario.material).ok_or_else(|| {
            StrandError::InvalidConfig(format!(
                "unknown material '{}', expected one of {:?}",
                config.scenario.material,
                database.names()
            ))
        })?;
        let mut scenario = Self::build(
            config.scenario.kind,
            config.scenario.n_elems,
            material,
            &config.contact,
            config.gravity(),
        )?;
        scenario.simulator.set_stepper(stepper_for(config.stepper));
        scenario.final_time = config.final_time;
        scenario.total_steps = config.total_steps;
        Ok(scenario)
    }

    /// Keeps the step size but stops after `steps` steps.
    pub fn truncated(mut self, steps: u64) -> Self {
        let dt = self.dt();
        self.total_steps = steps.max(1);
        self.final_time = dt * self.total_steps as f64;
        self
    }

    pub fn dt(&self) -> f64 {
        self.final_time / self.total_steps as f64
    }

    /// Free rod bent into an inverted V of 45° arms in the x–z plane.
    ///
    /// Rest curvature is zero, so the rod oscillates about straight with no
    /// external load; total energy is the quantity to watch.
    pub fn butterfly(n_elems: usize) -> StrandResult<Self> {
        let n_elems = n_elems + n_elems % 2;
        let half = n_elems / 2;
        let total_length = 3.0;
        let dl = total_length / n_elems as f64;
        let angle = 45.0_f64.to_radians();
        let horizontal = DVec3::Z;
        let vertical = DVec3::X;
        let rising = (horizontal * angle.cos() + vertical * angle.sin()) * dl;
        let falling = (horizontal * angle.cos() - vertical * angle.sin()) * dl;

        let mut positions: Vec<DVec3> = (0..=half).map(|k| rising * k as f64).collect();
        let apex = positions[half];
        positions.extend((1..=half).map(|k| apex + falling * k as f64));

        let material = RodMaterial::new("butterfly", 5000.0, 1.0e4, 0.5);
        let rod = straight_rod_from_positions(&positions, DVec3::Y, 0.25, &material)?;

        let mut systems = SystemCollection::new();
        let id = systems.append_rod(rod)?;
        let simulator = Simulator::new(systems, StepperKind::PositionVerlet)?;

        let final_time = 40.0;
        Ok(Self {
            kind: ScenarioKind::Butterfly,
            simulator,
            rod: id,
            n_elems,
            final_time,
            total_steps: steps_for(final_time, 0.01 * dl),
        })
    }

    /// Unit-length rod along x, clamped at the origin.
    pub fn cantilever(n_elems: usize, material: &RodMaterial, gravity: DVec3) -> StrandResult<Self> {
        let length = 1.0;
        let rod = straight_rod(
            &RodGeometry {
                n_elems,
                start: DVec3::ZERO,
                direction: DVec3::X,
                normal: DVec3::Z,
                base_length: length,
                base_radius: 0.05,
            },
            material,
        )?;

        let mut systems = SystemCollection::new();
        let id = systems.append_rod(rod)?;
        let mut simulator = Simulator::new(systems, StepperKind::PositionVerlet)?;
        let clamp = OneEndFixedRod::at_current_start(simulator.systems(), id)?;
        simulator.add_constraint(Box::new(clamp));
        simulator.add_forcing(Box::new(GravityForces::new(gravity)));

        let final_time = 1.0;
        let dl = length / n_elems as f64;
        Ok(Self {
            kind: ScenarioKind::Cantilever,
            simulator,
            rod: id,
            n_elems,
            final_time,
            total_steps: steps_for(final_time, DEFAULT_DT_PER_LENGTH * dl),
        })
    }

    /// Rod released just above a fixed horizontal cylinder.
    pub fn cylinder_contact(
        n_elems: usize,
        material: &RodMaterial,
        contact: &ContactConfig,
        gravity: DVec3,
    ) -> StrandResult<Self> {
        let length = 1.0;
        let rod = straight_rod(
            &RodGeometry {
                n_elems,
                start: DVec3::new(-0.5 * length, 0.0, 0.3),
                direction: DVec3::X,
                normal: DVec3::Z,
                base_length: length,
                base_radius: 0.025,
            },
            material,
        )?;
        let cylinder = Cylinder::new(DVec3::new(0.0, -0.5, 0.0), DVec3::Y, DVec3::X, 1.0, 0.2, material.density)?;

        let mut systems = SystemCollection::new();
        let id = systems.append_rod(rod)?;
        let body = systems.append_cylinder(cylinder);
        let mut simulator = Simulator::new(systems, StepperKind::PositionVerlet)?;
        let hold = FixedRigidBody::at_current_pose(simulator.systems(), body)?;
        simulator.add_constraint(Box::new(hold));
        simulator.add_forcing(Box::new(GravityForces::new(gravity)));
        simulator.add_forcing(Box::new(RodCylinderContact::new(id, body, ContactParams::from(contact))));

        let final_time = 1.0;
        let dl = length / n_elems as f64;
        Ok(Self {
            kind: ScenarioKind::CylinderContact,
            simulator,
            rod: id,
            n_elems,
            final_time,
            total_steps: steps_for(final_time, DEFAULT_DT_PER_LENGTH * dl),
        })
    }

    /// Slender rod along z whose ends approach by a slack of 3 while turning
    /// 27 half-turns in opposite senses over 500 time units.
    ///
    /// Stiffnesses are set directly: shear `1e5 I`, bend
    /// `diag(1.345, 1.345, 0.789)`. A `1e-6` transverse kick on the middle
    /// node breaks the symmetry.
    pub fn helical_buckling(n_elems: usize) -> StrandResult<Self> {
        let base_length = 100.0;
        let base_radius = 0.35;
        let area = std::f64::consts::PI * base_radius * base_radius;
        let material = RodMaterial::new("helical_buckling", 1.0 / area, 1.0e6, 99.0).with_damping(0.01);
        let mut rod = straight_rod(
            &RodGeometry {
                n_elems,
                start: DVec3::ZERO,
                direction: DVec3::Z,
                normal: DVec3::Y,
                base_length,
                base_radius,
            },
            &material,
        )?;
        rod.fields.shear_matrix.fill(DMat3::from_diagonal(DVec3::splat(1.0e5)));
        rod.fields.bend_matrix.fill(DMat3::from_diagonal(DVec3::new(1.345, 1.345, 0.789)));

        let mut systems = SystemCollection::new();
        let id = systems.append_rod(rod)?;
        let mut simulator = Simulator::new(systems, StepperKind::PositionVerlet)?;
        let twist = HelicalBucklingBC::new(simulator.systems(), id, 500.0, 3.0, 27.0)?;
        simulator.add_constraint(Box::new(twist));
        simulator.systems_mut().rod_mut(id)?.velocity_mut()[n_elems / 2] += DVec3::new(0.0, 1.0e-6, 0.0);

        let final_time = 10_500.0;
        let dl = base_length / n_elems as f64;
        Ok(Self {
            kind: ScenarioKind::HelicalBuckling,
            simulator,
            rod: id,
            n_elems,
            final_time,
            total_steps: steps_for(final_time, DEFAULT_DT_PER_LENGTH * dl),
        })
    }
}
