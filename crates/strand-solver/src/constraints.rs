//! Boundary conditions.
//!
//! A constraint overwrites state after each sub-step: values (positions and
//! directors) after a kinematic update, rates (velocities and angular
//! velocities) after a dynamic update.

use glam::{DMat3, DVec3};
use strand_math::rotation::director_rotation;
use strand_types::{RigidBodyId, RodId, StrandError, StrandResult};

use crate::collection::SystemCollection;

/// A boundary condition applied between sub-steps.
pub trait Constraint: Send {
    /// Enforces positions and directors.
    fn constrain_values(&mut self, systems: &mut SystemCollection, time: f64) -> StrandResult<()>;

    /// Enforces velocities and angular velocities.
    fn constrain_rates(&mut self, systems: &mut SystemCollection, time: f64) -> StrandResult<()>;

    fn name(&self) -> &str;
}

// ─── FreeRod ──────────────────────────────────────────────────

/// Leaves the rod unconstrained.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeRod;

impl Constraint for FreeRod {
    fn constrain_values(&mut self, _systems: &mut SystemCollection, _time: f64) -> StrandResult<()> {
        Ok(())
    }

    fn constrain_rates(&mut self, _systems: &mut SystemCollection, _time: f64) -> StrandResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "free_rod"
    }
}

// ─── OneEndFixedRod ───────────────────────────────────────────

/// Clamps the first node and first element of a rod.
#[derive(Debug, Clone, Copy)]
pub struct OneEndFixedRod {
    pub rod: RodId,
    pub fixed_position: DVec3,
    pub fixed_director: DMat3,
}

impl OneEndFixedRod {
    pub fn new(rod: RodId, fixed_position: DVec3, fixed_director: DMat3) -> Self {
        Self {
            rod,
            fixed_position,
            fixed_director,
        }
    }

    /// Clamps the rod's start where it currently is.
    pub fn at_current_start(systems: &SystemCollection, rod: RodId) -> StrandResult<Self> {
        let view = systems.rod(rod)?;
        Ok(Self::new(rod, view.position()[0], view.director()[0]))
    }
}

impl Constraint for OneEndFixedRod {
    fn constrain_values(&mut self, systems: &mut SystemCollection, _time: f64) -> StrandResult<()> {
        let mut rod = systems.rod_mut(self.rod)?;
        rod.position_mut()[0] = self.fixed_position;
        rod.director_mut()[0] = self.fixed_director;
        Ok(())
    }

    fn constrain_rates(&mut self, systems: &mut SystemCollection, _time: f64) -> StrandResult<()> {
        let mut rod = systems.rod_mut(self.rod)?;
        rod.velocity_mut()[0] = DVec3::ZERO;
        rod.omega_mut()[0] = DVec3::ZERO;
        Ok(())
    }

    fn name(&self) -> &str {
        "one_end_fixed_rod"
    }
}

// ─── FixedRigidBody ───────────────────────────────────────────

/// Holds a rigid body at a fixed pose.
#[derive(Debug, Clone, Copy)]
pub struct FixedRigidBody {
    pub body: RigidBodyId,
    pub position: DVec3,
    pub director: DMat3,
}

impl FixedRigidBody {
    /// Fixes the body at its current pose.
    pub fn at_current_pose(systems: &SystemCollection, body: RigidBodyId) -> StrandResult<Self> {
        let cylinder = systems.cylinder(body)?;
        Ok(Self {
            body,
            position: cylinder.position,
            director: cylinder.director,
        })
    }
}

impl Constraint for FixedRigidBody {
    fn constrain_values(&mut self, systems: &mut SystemCollection, _time: f64) -> StrandResult<()> {
        let cylinder = systems.cylinder_mut(self.body)?;
        cylinder.position = self.position;
        cylinder.director = self.director;
        Ok(())
    }

    fn constrain_rates(&mut self, systems: &mut SystemCollection, _time: f64) -> StrandResult<()> {
        let cylinder = systems.cylinder_mut(self.body)?;
        cylinder.velocity = DVec3::ZERO;
        cylinder.omega = DVec3::ZERO;
        Ok(())
    }

    fn name(&self) -> &str {
        "fixed_rigid_body"
    }
}

// ─── HelicalBucklingBC ────────────────────────────────────────

/// Pulls both ends of a rod together while twisting them in opposite
/// directions, then holds them.
///
/// Until `twisting_time` the end nodes move towards each other at
/// `slack / (2 T)` and the end elements spin at `±π N / T` about the rod
/// axis, so that after `T` the ends are `slack` closer and the rod carries
/// `N` full turns of twist. Afterwards ends are fixed at their final pose.
#[derive(Debug, Clone, Copy)]
pub struct HelicalBucklingBC {
    pub rod: RodId,
    pub twisting_time: f64,
    shrink_velocity: DVec3,
    angular_velocity: DVec3,
    final_start_position: DVec3,
    final_end_position: DVec3,
    final_start_director: DMat3,
    final_end_director: DMat3,
}

impl HelicalBucklingBC {
    /// Reads the rod's current end poses and derives the twisting schedule.
    pub fn new(
        systems: &SystemCollection,
        rod: RodId,
        twisting_time: f64,
        slack: f64,
        number_of_rotations: f64,
    ) -> StrandResult<Self> {
        if !twisting_time.is_finite() || twisting_time <= 0.0 {
            return Err(StrandError::InvalidConfig(format!(
                "twisting_time must be positive, got {twisting_time}"
            )));
        }
        let view = systems.rod(rod)?;
        let x = view.position();
        let q = view.director();
        let (start, end) = (x[0], x[x.len() - 1]);
        let direction = (end - start).try_normalize().ok_or_else(|| {
            StrandError::InvalidConfig("rod ends coincide; no twisting axis".into())
        })?;

        let theta = number_of_rotations * std::f64::consts::PI;
        Ok(Self {
            rod,
            twisting_time,
            shrink_velocity: direction * (slack / (2.0 * twisting_time)),
            angular_velocity: direction * (theta / twisting_time),
            final_start_position: start + direction * (0.5 * slack),
            final_end_position: end - direction * (0.5 * slack),
            final_start_director: director_rotation(direction * theta) * q[0],
            final_end_director: director_rotation(direction * -theta) * q[q.len() - 1],
        })
    }

    pub fn final_positions(&self) -> (DVec3, DVec3) {
        (self.final_start_position, self.final_end_position)
    }
}

impl Constraint for HelicalBucklingBC {
    fn constrain_values(&mut self, systems: &mut SystemCollection, time: f64) -> StrandResult<()> {
        if time > self.twisting_time {
            let mut rod = systems.rod_mut(self.rod)?;
            let x = rod.position_mut();
            let last = x.len() - 1;
            x[0] = self.final_start_position;
            x[last] = self.final_end_position;
            let q = rod.director_mut();
            let last = q.len() - 1;
            q[0] = self.final_start_director;
            q[last] = self.final_end_director;
        }
        Ok(())
    }

    fn constrain_rates(&mut self, systems: &mut SystemCollection, time: f64) -> StrandResult<()> {
        let (v, w) = if time > self.twisting_time {
            (DVec3::ZERO, DVec3::ZERO)
        } else {
            (self.shrink_velocity, self.angular_velocity)
        };
        let mut rod = systems.rod_mut(self.rod)?;
        let velocity = rod.velocity_mut();
        let last = velocity.len() - 1;
        velocity[0] = v;
        velocity[last] = -v;
        let omega = rod.omega_mut();
        let last = omega.len() - 1;
        omega[0] = w;
        omega[last] = -w;
        Ok(())
    }

    fn name(&self) -> &str {
        "helical_buckling"
    }
}
