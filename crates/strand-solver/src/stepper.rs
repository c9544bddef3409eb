//! Symplectic time steppers.
//!
//! A step is a fixed alternation of kinematic sub-steps
//! (`x += c dt v`, `Q ← exp(-c dt [ω]) Q`) and dynamic sub-steps
//! (`v += c dt a`, `ω += c dt α`). Accelerations are re-evaluated before
//! every dynamic sub-step; constraints are applied after every sub-step.

use strand_types::StrandResult;

use crate::collection::SystemCollection;
use crate::config::StepperKind;
use crate::constraints::Constraint;
use crate::forcing::ForceContributor;

/// Everything a stepper advances: systems plus the loads and boundary
/// conditions attached to them.
pub struct StepContext<'a> {
    pub systems: &'a mut SystemCollection,
    pub forcing: &'a mut [Box<dyn ForceContributor>],
    pub constraints: &'a mut [Box<dyn Constraint>],
}

impl StepContext<'_> {
    /// Kinematic sub-step of size `c dt` followed by value constraints.
    ///
    /// Returns the advanced time.
    pub fn kinematic(&mut self, time: f64, dt: f64) -> StrandResult<f64> {
        self.systems.kinematic_step(dt);
        let time = time + dt;
        for constraint in self.constraints.iter_mut() {
            constraint.constrain_values(self.systems, time)?;
        }
        Ok(time)
    }

    /// Acceleration evaluation and dynamic sub-step of size `c dt`, followed
    /// by rate constraints.
    pub fn dynamic(&mut self, time: f64, dt: f64) -> StrandResult<()> {
        self.systems.compute_accelerations(self.forcing, time)?;
        self.systems.dynamic_step(dt);
        for constraint in self.constraints.iter_mut() {
            constraint.constrain_rates(self.systems, time)?;
        }
        Ok(())
    }
}

/// A fixed-step symplectic integrator.
pub trait TimeStepper: Send {
    /// Advances one step of size `dt` from `time`; returns the new time.
    fn step(&self, ctx: &mut StepContext<'_>, time: f64, dt: f64) -> StrandResult<f64>;

    /// Acceleration evaluations per step.
    fn n_stages(&self) -> usize;

    fn name(&self) -> &str;
}

/// Half kinematic, full dynamic, half kinematic.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionVerlet;

impl TimeStepper for PositionVerlet {
    fn step(&self, ctx: &mut StepContext<'_>, time: f64, dt: f64) -> StrandResult<f64> {
        let time = ctx.kinematic(time, 0.5 * dt)?;
        ctx.dynamic(time, dt)?;
        ctx.kinematic(time, 0.5 * dt)
    }

    fn n_stages(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "position_verlet"
    }
}

/// Position-extended Forest-Ruth-like fourth-order integrator
/// (Omelyan, Mryglod and Folk, 2002).
#[derive(Debug, Clone, Copy, Default)]
pub struct Pefrl;

impl Pefrl {
    pub const XI: f64 = 0.1786178958448091;
    pub const LAMBDA: f64 = -0.2123418310626054;
    pub const CHI: f64 = -0.06626458266981849;
}

impl TimeStepper for Pefrl {
    fn step(&self, ctx: &mut StepContext<'_>, time: f64, dt: f64) -> StrandResult<f64> {
        let outer_dynamic = 0.5 * (1.0 - 2.0 * Self::LAMBDA);
        let middle_kinematic = 1.0 - 2.0 * (Self::CHI + Self::XI);

        let mut time = ctx.kinematic(time, Self::XI * dt)?;
        ctx.dynamic(time, outer_dynamic * dt)?;
        time = ctx.kinematic(time, Self::CHI * dt)?;
        ctx.dynamic(time, Self::LAMBDA * dt)?;
        time = ctx.kinematic(time, middle_kinematic * dt)?;
        ctx.dynamic(time, Self::LAMBDA * dt)?;
        time = ctx.kinematic(time, Self::CHI * dt)?;
        ctx.dynamic(time, outer_dynamic * dt)?;
        ctx.kinematic(time, Self::XI * dt)
    }

    fn n_stages(&self) -> usize {
        4
    }

    fn name(&self) -> &str {
        "pefrl"
    }
}

/// Boxed stepper for a configured kind.
pub fn stepper_for(kind: StepperKind) -> Box<dyn TimeStepper> {
    match kind {
        StepperKind::PositionVerlet => Box::new(PositionVerlet),
        StepperKind::Pefrl => Box::new(Pefrl),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pefrl_coefficients_sum_to_one() {
        let kinematic = 2.0 * Pefrl::XI + 2.0 * Pefrl::CHI + (1.0 - 2.0 * (Pefrl::CHI + Pefrl::XI));
        let dynamic = (1.0 - 2.0 * Pefrl::LAMBDA) + 2.0 * Pefrl::LAMBDA;
        assert!((kinematic - 1.0).abs() < 1e-15);
        assert!((dynamic - 1.0).abs() < 1e-15);
    }

    #[test]
    fn stepper_for_matches_kind() {
        assert_eq!(stepper_for(StepperKind::PositionVerlet).name(), "position_verlet");
        assert_eq!(stepper_for(StepperKind::Pefrl).n_stages(), 4);
    }
}
