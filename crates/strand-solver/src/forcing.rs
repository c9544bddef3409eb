//! External force and torque contributors.
//!
//! Contributors run once per acceleration evaluation, after the external
//! accumulators were cleared, in the order they were registered. Each one
//! only ever adds into `external_forces` / `external_torques`.

use glam::DVec3;
use strand_rod::{Domain, ElementScalar};
use strand_telemetry::EventKind;
use strand_types::{RodId, StrandError, StrandResult};

use crate::collection::SystemCollection;

/// A source of external loads.
pub trait ForceContributor: Send {
    /// Adds this contributor's loads at `time`.
    fn apply(&mut self, systems: &mut SystemCollection, time: f64) -> StrandResult<()>;

    fn name(&self) -> &str;

    /// Summary of the last [`apply`](Self::apply), reported to telemetry
    /// after each step.
    fn diagnostics(&self) -> Option<EventKind> {
        None
    }
}

/// Linear ramp `min(1, time / ramp_up_time)`; a zero ramp is a step.
fn ramp(time: f64, ramp_up_time: f64) -> f64 {
    if ramp_up_time <= 0.0 {
        1.0
    } else {
        (time / ramp_up_time).min(1.0)
    }
}

fn check_ramp(ramp_up_time: f64) -> StrandResult<()> {
    if !ramp_up_time.is_finite() || ramp_up_time < 0.0 {
        return Err(StrandError::InvalidConfig(format!(
            "ramp_up_time must be non-negative, got {ramp_up_time}"
        )));
    }
    Ok(())
}

// ─── NoForces ─────────────────────────────────────────────────

/// Adds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoForces;

impl ForceContributor for NoForces {
    fn apply(&mut self, _systems: &mut SystemCollection, _time: f64) -> StrandResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "no_forces"
    }
}

// ─── GravityForces ────────────────────────────────────────────

/// Uniform gravitational acceleration on every rod node and rigid body.
#[derive(Debug, Clone, Copy)]
pub struct GravityForces {
    pub acceleration: DVec3,
}

impl GravityForces {
    pub fn new(acceleration: DVec3) -> Self {
        Self { acceleration }
    }
}

impl ForceContributor for GravityForces {
    fn apply(&mut self, systems: &mut SystemCollection, _time: f64) -> StrandResult<()> {
        let g = self.acceleration;
        for block in systems.blocks_mut() {
            let ranges: Vec<_> = (0..block.n_rods())
                .map(|k| block.rod_range(Domain::Node, k))
                .collect();
            let f = block.fields_mut();
            for range in ranges {
                for i in range {
                    f.external_forces[i] += g * f.mass[i];
                }
            }
        }
        for cylinder in systems.cylinders_mut() {
            cylinder.external_forces += g * cylinder.mass;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "gravity"
    }
}

// ─── EndpointForces ───────────────────────────────────────────

/// Point forces on the first and last node of a rod, ramped up linearly.
#[derive(Debug, Clone, Copy)]
pub struct EndpointForces {
    pub rod: RodId,
    pub start_force: DVec3,
    pub end_force: DVec3,
    pub ramp_up_time: f64,
}

impl EndpointForces {
    pub fn new(rod: RodId, start_force: DVec3, end_force: DVec3, ramp_up_time: f64) -> StrandResult<Self> {
        check_ramp(ramp_up_time)?;
        Ok(Self {
            rod,
            start_force,
            end_force,
            ramp_up_time,
        })
    }
}

impl ForceContributor for EndpointForces {
    fn apply(&mut self, systems: &mut SystemCollection, time: f64) -> StrandResult<()> {
        let factor = ramp(time, self.ramp_up_time);
        let mut rod = systems.rod_mut(self.rod)?;
        let forces = rod.external_forces_mut();
        let last = forces.len() - 1;
        forces[0] += self.start_force * factor;
        forces[last] += self.end_force * factor;
        Ok(())
    }

    fn name(&self) -> &str {
        "endpoint_forces"
    }
}

// ─── UniformForces ────────────────────────────────────────────

/// A total force spread evenly over a rod's elements and lumped onto nodes.
#[derive(Debug, Clone, Copy)]
pub struct UniformForces {
    pub rod: RodId,
    /// Total force on the rod.
    pub force: DVec3,
}

impl UniformForces {
    pub fn new(rod: RodId, magnitude: f64, direction: DVec3) -> Self {
        Self {
            rod,
            force: direction * magnitude,
        }
    }
}

impl ForceContributor for UniformForces {
    fn apply(&mut self, systems: &mut SystemCollection, _time: f64) -> StrandResult<()> {
        let mut rod = systems.rod_mut(self.rod)?;
        let per_element = self.force / rod.n_elems() as f64;
        let forces = rod.external_forces_mut();
        for f in forces.iter_mut() {
            *f += per_element;
        }
        let last = forces.len() - 1;
        forces[0] -= per_element * 0.5;
        forces[last] -= per_element * 0.5;
        Ok(())
    }

    fn name(&self) -> &str {
        "uniform_forces"
    }
}

// ─── UniformTorques ───────────────────────────────────────────

/// A total lab-frame torque spread evenly over a rod's elements.
#[derive(Debug, Clone, Copy)]
pub struct UniformTorques {
    pub rod: RodId,
    /// Total torque on the rod.
    pub torque: DVec3,
}

impl UniformTorques {
    pub fn new(rod: RodId, magnitude: f64, direction: DVec3) -> Self {
        Self {
            rod,
            torque: direction * magnitude,
        }
    }
}

impl ForceContributor for UniformTorques {
    fn apply(&mut self, systems: &mut SystemCollection, _time: f64) -> StrandResult<()> {
        let loads = systems.rod_loads(self.rod)?;
        let per_element = self.torque / loads.director.len() as f64;
        for (tau, q) in loads.external_torques.iter_mut().zip(loads.director) {
            *tau += *q * per_element;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "uniform_torques"
    }
}

// ─── MuscleTorques ────────────────────────────────────────────

/// Travelling-wave muscle activation along a rod.
///
/// The torque magnitude at the end of element `k`, with `s` its arc-length
/// coordinate normalized to `[0, 1]`, is
///
/// ```text
/// τ(s, t) = ramp(t) · A(s) · sin(2π t / period - wave_number · s + phase_shift)
/// ```
///
/// where `A` interpolates `amplitude` linearly over uniformly spaced control
/// points (a single point is a constant amplitude). Each torque acts along
/// `direction` in the material frame and is applied as a couple: element
/// `k` receives `+Qₖ τₖ` and element `k - 1` receives `-Qₖ₋₁ τₖ`.
#[derive(Debug, Clone)]
pub struct MuscleTorques {
    pub rod: RodId,
    pub direction: DVec3,
    pub amplitude: Vec<f64>,
    pub period: f64,
    pub wave_number: f64,
    pub phase_shift: f64,
    pub ramp_up_time: f64,
    /// Normalized arc-length coordinates, filled on first use.
    s: Vec<f64>,
    torque: Vec<DVec3>,
}

impl MuscleTorques {
    pub fn new(
        rod: RodId,
        direction: DVec3,
        amplitude: Vec<f64>,
        period: f64,
        wave_number: f64,
        phase_shift: f64,
        ramp_up_time: f64,
    ) -> StrandResult<Self> {
        check_ramp(ramp_up_time)?;
        if amplitude.is_empty() {
            return Err(StrandError::InvalidConfig(
                "muscle amplitude needs at least one control point".into(),
            ));
        }
        if !period.is_finite() || period <= 0.0 {
            return Err(StrandError::InvalidConfig(format!(
                "muscle period must be positive, got {period}"
            )));
        }
        Ok(Self {
            rod,
            direction,
            amplitude,
            period,
            wave_number,
            phase_shift,
            ramp_up_time,
            s: Vec::new(),
            torque: Vec::new(),
        })
    }

    fn profile(&self, s: f64) -> f64 {
        let n = self.amplitude.len();
        if n == 1 {
            return self.amplitude[0];
        }
        let x = s.clamp(0.0, 1.0) * (n - 1) as f64;
        let i = (x.floor() as usize).min(n - 2);
        let t = x - i as f64;
        self.amplitude[i] * (1.0 - t) + self.amplitude[i + 1] * t
    }

    /// Torque vectors of the current evaluation, one per element.
    pub fn torque(&self) -> &[DVec3] {
        &self.torque
    }
}

impl ForceContributor for MuscleTorques {
    fn apply(&mut self, systems: &mut SystemCollection, time: f64) -> StrandResult<()> {
        if self.s.is_empty() {
            let rest = systems.rod(self.rod)?.element_scalar(ElementScalar::RestLengths);
            let total: f64 = rest.iter().sum();
            let mut acc = 0.0;
            self.s = rest
                .iter()
                .map(|l| {
                    acc += l;
                    acc / total
                })
                .collect();
        }

        let factor = ramp(time, self.ramp_up_time);
        let omega = 2.0 * std::f64::consts::PI / self.period;
        self.torque = self
            .s
            .iter()
            .map(|&s| {
                let magnitude = factor
                    * self.profile(s)
                    * (omega * time - self.wave_number * s + self.phase_shift).sin();
                self.direction * magnitude
            })
            .collect();

        let loads = systems.rod_loads(self.rod)?;
        let q = loads.director;
        for k in 1..self.torque.len() {
            loads.external_torques[k] += q[k] * self.torque[k];
            loads.external_torques[k - 1] -= q[k - 1] * self.torque[k];
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "muscle_torques"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_saturates() {
        assert_eq!(ramp(0.5, 1.0), 0.5);
        assert_eq!(ramp(3.0, 1.0), 1.0);
        assert_eq!(ramp(0.0, 0.0), 1.0);
    }

    #[test]
    fn muscle_profile_interpolates() {
        let m = MuscleTorques::new(RodId(0), DVec3::X, vec![0.0, 2.0, 4.0], 1.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(m.profile(0.0), 0.0);
        assert_eq!(m.profile(0.25), 1.0);
        assert_eq!(m.profile(1.0), 4.0);
    }

    #[test]
    fn muscle_rejects_bad_period() {
        assert!(MuscleTorques::new(RodId(0), DVec3::X, vec![1.0], 0.0, 0.0, 0.0, 0.0).is_err());
        assert!(MuscleTorques::new(RodId(0), DVec3::X, vec![], 1.0, 0.0, 0.0, 0.0).is_err());
    }
}
