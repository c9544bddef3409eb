//! Rigid cylinder bodies.
//!
//! A cylinder is described by its center, a director frame whose third row
//! is the cylinder axis, and the usual linear/angular state. It is advanced
//! by the same steppers as rods.

use std::f64::consts::PI;

use glam::{DMat3, DVec3};
use strand_math::rotation::{director, director_rotation, from_directors};
use strand_types::{StrandError, StrandResult};

/// A rigid circular cylinder.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    // ─── State ───
    /// Center of mass.
    pub position: DVec3,
    pub velocity: DVec3,
    pub acceleration: DVec3,
    /// Rows are `d1, d2, d3`; `d3` is the cylinder axis.
    pub director: DMat3,
    /// Angular velocity in the local frame.
    pub omega: DVec3,
    pub alpha: DVec3,

    // ─── Load accumulators ───
    pub external_forces: DVec3,
    /// External torque in the local frame.
    pub external_torques: DVec3,

    // ─── Geometry and inertia ───
    pub radius: f64,
    pub length: f64,
    pub density: f64,
    pub volume: f64,
    pub mass: f64,
    pub mass_second_moment_of_inertia: DMat3,
    pub inv_mass_second_moment_of_inertia: DMat3,
}

impl Cylinder {
    /// Builds a cylinder whose axis starts at `start` and runs `base_length`
    /// along `direction`. `normal` fixes `d1`.
    pub fn new(
        start: DVec3,
        direction: DVec3,
        normal: DVec3,
        base_length: f64,
        base_radius: f64,
        density: f64,
    ) -> StrandResult<Self> {
        for (name, value) in [("length", base_length), ("radius", base_radius), ("density", density)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(StrandError::InvalidConfig(format!(
                    "cylinder {name} must be positive, got {value}"
                )));
            }
        }
        let d3 = direction.try_normalize().ok_or_else(|| {
            StrandError::InvalidConfig("cylinder direction must be non-zero".into())
        })?;
        let d1 = (normal - d3 * normal.dot(d3)).try_normalize().ok_or_else(|| {
            StrandError::InvalidConfig("cylinder normal must not be parallel to its axis".into())
        })?;
        let d2 = d3.cross(d1);

        let area = PI * base_radius * base_radius;
        let volume = area * base_length;
        let mass = density * volume;
        let i1 = area * area / (4.0 * PI);
        let inertia = DVec3::new(i1, i1, 2.0 * i1) * (density * base_length);

        Ok(Self {
            position: start + d3 * (0.5 * base_length),
            velocity: DVec3::ZERO,
            acceleration: DVec3::ZERO,
            director: from_directors(d1, d2, d3),
            omega: DVec3::ZERO,
            alpha: DVec3::ZERO,
            external_forces: DVec3::ZERO,
            external_torques: DVec3::ZERO,
            radius: base_radius,
            length: base_length,
            density,
            volume,
            mass,
            mass_second_moment_of_inertia: DMat3::from_diagonal(inertia),
            inv_mass_second_moment_of_inertia: DMat3::from_diagonal(inertia.recip()),
        })
    }

    /// Unit axis `d3` in the lab frame.
    pub fn axis(&self) -> DVec3 {
        director(&self.director, 2)
    }

    /// Start of the axis segment: `center - ½ L d3`.
    pub fn tip(&self) -> DVec3 {
        self.position - self.axis() * (0.5 * self.length)
    }

    /// Axis segment `L d3`.
    pub fn edge(&self) -> DVec3 {
        self.axis() * self.length
    }

    pub fn zero_external_loads(&mut self) {
        self.external_forces = DVec3::ZERO;
        self.external_torques = DVec3::ZERO;
    }

    /// `a = F / m`, `α = J⁻¹ (τ + (J ω) × ω)`.
    pub fn update_accelerations(&mut self) {
        self.acceleration = self.external_forces / self.mass;
        let j_omega = self.mass_second_moment_of_inertia * self.omega;
        self.alpha = self.inv_mass_second_moment_of_inertia * (self.external_torques + j_omega.cross(self.omega));
    }

    /// `x += dt v`, `Q ← exp(-dt [ω]) Q`.
    pub fn update_kinematics(&mut self, dt: f64) {
        self.position += self.velocity * dt;
        self.director = director_rotation(self.omega * dt) * self.director;
    }

    /// `v += dt a`, `ω += dt α`.
    pub fn update_dynamics(&mut self, dt: f64) {
        self.velocity += self.acceleration * dt;
        self.omega += self.alpha * dt;
    }

    /// Translational plus rotational kinetic energy.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
            + 0.5 * self.omega.dot(self.mass_second_moment_of_inertia * self.omega)
    }
}
