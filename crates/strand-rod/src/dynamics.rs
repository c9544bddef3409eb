//! Kinematics and dynamics update of a memory block.
//!
//! One evaluation runs, block-wide and in order:
//!
//! 1. periodic ghost sync (ring blocks),
//! 2. geometry: lengths, tangents, radius, dilatation and its rate,
//! 3. strains: voronoi dilatation, curvature `κ`, shear/stretch strain `σ`,
//! 4. stresses: `n = S (σ - σ̂)`, couples `m = B (κ - κ̂)`,
//! 5. internal forces and torques,
//!
//! after which [`update_accelerations`] turns the summed loads into linear
//! and angular accelerations. Separator ghost slots are reset after each
//! stage so no kernel mixes two rods.

use std::f64::consts::PI;

use glam::DVec3;
use strand_math::calculus::{difference_into, quadrature_into};
use strand_math::linalg::{batch_cross, batch_matvec, batch_transpose_matvec};
use strand_math::rotation::{director_rotation, inv_rotate_into};
use strand_types::{StrandError, StrandResult};

use crate::memory_block::{MemoryBlock, RodView};
use crate::system::{ElementMatrix, ElementScalar, ElementVector, VoronoiMatrix, VoronoiScalar, VoronoiVector};

/// Computes internal forces and torques of every rod in the block.
///
/// Fails with [`StrandError::PhysicalState`] on a non-finite or
/// non-positive node mass, element length or voronoi dilatation, or a
/// singular mass second moment of inertia, naming the block-local rod and
/// the rod-local index. Nothing is clamped.
pub fn compute_internal_forces_and_torques(block: &mut MemoryBlock) -> StrandResult<()> {
    block.synchronize_periodic();
    check_mass_and_inertia(block)?;
    compute_geometry(block)?;
    compute_strains(block)?;
    compute_stresses(block)?;
    compute_internal_forces(block)?;
    compute_internal_torques(block)?;
    Ok(())
}

/// Node masses and element inertias divide the loads in
/// [`update_accelerations`]; only real slots are checked.
fn check_mass_and_inertia(block: &MemoryBlock) -> StrandResult<()> {
    let MemoryBlock { fields: f, nodes, elems, .. } = block;

    for (rod, (&start, &end)) in nodes.start.iter().zip(&nodes.end).enumerate() {
        for i in start..end {
            let m = f.mass[i];
            if !m.is_finite() || m <= 0.0 {
                return Err(StrandError::physical(rod, i - start, format!("node mass is {m}")));
            }
        }
    }

    for (rod, (&start, &end)) in elems.start.iter().zip(&elems.end).enumerate() {
        for k in start..end {
            let det = f.mass_second_moment_of_inertia[k].determinant();
            if !det.is_finite() || det <= 0.0 || !f.inv_mass_second_moment_of_inertia[k].is_finite() {
                return Err(StrandError::physical(
                    rod,
                    k - start,
                    format!("mass second moment of inertia is not invertible (det {det})"),
                ));
            }
        }
    }
    Ok(())
}

fn compute_geometry(block: &mut MemoryBlock) -> StrandResult<()> {
    let MemoryBlock { fields: f, elems, .. } = block;

    for k in 0..f.n_elems() {
        let dx = f.position[k + 1] - f.position[k];
        let dv = f.velocity[k + 1] - f.velocity[k];
        let l = dx.length();
        let rest = f.rest_lengths[k];
        f.lengths[k] = l;
        f.tangents[k] = dx / l;
        f.radius[k] = (f.volume[k] / (PI * l)).sqrt();
        f.dilatation[k] = l / rest;
        f.dilatation_rate[k] = dx.dot(dv) / (l * rest);
    }

    for &g in &elems.ghosts {
        f.lengths[g] = 1.0;
        f.tangents[g] = DVec3::ZERO;
        f.radius[g] = 0.0;
        f.dilatation[g] = 1.0;
        f.dilatation_rate[g] = 0.0;
    }

    for (rod, (&start, &end)) in elems.start.iter().zip(&elems.end).enumerate() {
        for k in start..end {
            let l = f.lengths[k];
            if !l.is_finite() || l <= 0.0 {
                return Err(StrandError::physical(rod, k - start, format!("element length is {l}")));
            }
            let rest = f.rest_lengths[k];
            if !rest.is_finite() || rest <= 0.0 {
                return Err(StrandError::physical(rod, k - start, format!("rest length is {rest}")));
            }
        }
    }
    Ok(())
}

fn compute_strains(block: &mut MemoryBlock) -> StrandResult<()> {
    let MemoryBlock {
        fields: f,
        elems,
        voronoi,
        scratch,
        ..
    } = block;

    for v in 0..f.n_voronoi() {
        f.voronoi_dilatation[v] = 0.5 * (f.lengths[v] + f.lengths[v + 1]) / f.rest_voronoi_lengths[v];
    }
    inv_rotate_into(&f.director, &mut f.kappa)?;
    for (kappa, &rest) in f.kappa.iter_mut().zip(&f.rest_voronoi_lengths) {
        *kappa /= rest;
    }

    // σ = e (Q t) - d3
    batch_matvec(&f.director, &f.tangents, &mut scratch.elem_a)?;
    for k in 0..f.n_elems() {
        f.sigma[k] = scratch.elem_a[k] * f.dilatation[k] - DVec3::Z;
    }

    for &g in &voronoi.ghosts {
        f.voronoi_dilatation[g] = 1.0;
        f.kappa[g] = DVec3::ZERO;
    }
    for &g in &elems.ghosts {
        f.sigma[g] = DVec3::ZERO;
    }

    for (rod, (&start, &end)) in voronoi.start.iter().zip(&voronoi.end).enumerate() {
        for v in start..end {
            let e = f.voronoi_dilatation[v];
            if !e.is_finite() || e <= 0.0 {
                return Err(StrandError::physical(rod, v - start, format!("voronoi dilatation is {e}")));
            }
        }
    }
    Ok(())
}

fn compute_stresses(block: &mut MemoryBlock) -> StrandResult<()> {
    let MemoryBlock {
        fields: f,
        elems,
        voronoi,
        scratch,
        ..
    } = block;

    for (d, (s, s0)) in scratch.elem_a.iter_mut().zip(f.sigma.iter().zip(&f.rest_sigma)) {
        *d = *s - *s0;
    }
    batch_matvec(&f.shear_matrix, &scratch.elem_a, &mut f.internal_stress)?;

    for (d, (k, k0)) in scratch.voronoi.iter_mut().zip(f.kappa.iter().zip(&f.rest_kappa)) {
        *d = *k - *k0;
    }
    batch_matvec(&f.bend_matrix, &scratch.voronoi, &mut f.internal_couple)?;

    for &g in &elems.ghosts {
        f.internal_stress[g] = DVec3::ZERO;
    }
    for &g in &voronoi.ghosts {
        f.internal_couple[g] = DVec3::ZERO;
    }
    Ok(())
}

fn compute_internal_forces(block: &mut MemoryBlock) -> StrandResult<()> {
    let MemoryBlock {
        fields: f,
        nodes,
        scratch,
        ..
    } = block;

    // Qᵀ n / e, then the two-point difference onto nodes.
    batch_transpose_matvec(&f.director, &f.internal_stress, &mut scratch.elem_a)?;
    for (n, &e) in scratch.elem_a.iter_mut().zip(&f.dilatation) {
        *n /= e;
    }
    difference_into(&scratch.elem_a, &mut f.internal_forces)?;

    for ((force, &gamma), &v) in f
        .internal_forces
        .iter_mut()
        .zip(&f.dissipation_constant_for_forces)
        .zip(&f.velocity)
    {
        *force -= v * gamma;
    }

    for &g in &nodes.ghosts {
        f.internal_forces[g] = DVec3::ZERO;
    }
    Ok(())
}

fn compute_internal_torques(block: &mut MemoryBlock) -> StrandResult<()> {
    let MemoryBlock {
        fields: f,
        elems,
        scratch,
        ..
    } = block;

    // Bend/twist couple: difference(m / ε³).
    for ((d, &m), &eps) in scratch
        .voronoi
        .iter_mut()
        .zip(&f.internal_couple)
        .zip(&f.voronoi_dilatation)
    {
        *d = m / (eps * eps * eps);
    }
    difference_into(&scratch.voronoi, &mut f.internal_torques)?;

    // Lagrangian transport of curvature: quadrature((κ × m) l̂ / ε³).
    batch_cross(&f.kappa, &f.internal_couple, &mut scratch.voronoi)?;
    for v in 0..f.n_voronoi() {
        let eps = f.voronoi_dilatation[v];
        scratch.voronoi[v] *= f.rest_voronoi_lengths[v] / (eps * eps * eps);
    }
    quadrature_into(&scratch.voronoi, &mut scratch.elem_a)?;
    for (tau, &q) in f.internal_torques.iter_mut().zip(&scratch.elem_a) {
        *tau += q;
    }

    // Shear/stretch couple: ((Q t) × n) l̂.
    batch_matvec(&f.director, &f.tangents, &mut scratch.elem_a)?;
    batch_cross(&scratch.elem_a, &f.internal_stress, &mut scratch.elem_b)?;
    for k in 0..f.n_elems() {
        f.internal_torques[k] += scratch.elem_b[k] * f.rest_lengths[k];
    }

    // Transport and unsteady dilatation of angular momentum, then damping.
    batch_matvec(&f.mass_second_moment_of_inertia, &f.omega, &mut scratch.elem_a)?;
    for k in 0..f.n_elems() {
        let e = f.dilatation[k];
        let j_omega = scratch.elem_a[k] / e;
        let omega = f.omega[k];
        f.internal_torques[k] += j_omega.cross(omega) + j_omega * (f.dilatation_rate[k] / e)
            - omega * f.dissipation_constant_for_torques[k];
    }

    for &g in &elems.ghosts {
        f.internal_torques[g] = DVec3::ZERO;
    }
    Ok(())
}

/// Linear and angular accelerations from the summed internal and external loads.
///
/// `a = (F_int + F_ext) / m` on nodes, `α = J⁻¹ (τ_int + τ_ext) e` on elements.
pub fn update_accelerations(block: &mut MemoryBlock) {
    let MemoryBlock {
        fields: f,
        nodes,
        elems,
        ..
    } = block;

    for i in 0..f.n_nodes() {
        f.acceleration[i] = (f.internal_forces[i] + f.external_forces[i]) / f.mass[i];
    }
    for k in 0..f.n_elems() {
        f.alpha[k] = f.inv_mass_second_moment_of_inertia[k]
            * (f.internal_torques[k] + f.external_torques[k])
            * f.dilatation[k];
    }

    for &g in &nodes.ghosts {
        f.acceleration[g] = DVec3::ZERO;
    }
    for &g in &elems.ghosts {
        f.alpha[g] = DVec3::ZERO;
    }
}

/// Clears the external force and torque accumulators of the whole block.
pub fn zero_external_loads(block: &mut MemoryBlock) {
    let f = block.fields_mut();
    f.external_forces.fill(DVec3::ZERO);
    f.external_torques.fill(DVec3::ZERO);
}

/// Kinematic sub-step: `x += dt v`, `Q ← exp(-dt [ω]) Q`.
pub fn update_kinematics(block: &mut MemoryBlock, dt: f64) {
    let f = block.fields_mut();
    for (x, &v) in f.position.iter_mut().zip(&f.velocity) {
        *x += v * dt;
    }
    for (q, &w) in f.director.iter_mut().zip(&f.omega) {
        *q = director_rotation(w * dt) * *q;
    }
}

/// Dynamic sub-step: `v += dt a`, `ω += dt α`.
pub fn update_dynamics(block: &mut MemoryBlock, dt: f64) {
    let f = block.fields_mut();
    for (v, &a) in f.velocity.iter_mut().zip(&f.acceleration) {
        *v += a * dt;
    }
    for (w, &a) in f.omega.iter_mut().zip(&f.alpha) {
        *w += a * dt;
    }
}

// ─── Energies and diagnostics ──────────────────────────────────────────

/// `½ Σ m |v|²` over the rod's nodes.
pub fn translational_energy(rod: &RodView<'_>) -> f64 {
    rod.mass()
        .iter()
        .zip(rod.velocity())
        .map(|(&m, v)| 0.5 * m * v.length_squared())
        .sum()
}

/// `½ Σ ω · J ω` over the rod's elements.
pub fn rotational_energy(rod: &RodView<'_>) -> f64 {
    let inertia = rod.element_matrix(ElementMatrix::MassSecondMoment);
    rod.omega()
        .iter()
        .zip(inertia)
        .map(|(w, j)| 0.5 * w.dot(*j * *w))
        .sum()
}

/// `½ Σ (κ - κ̂) · B (κ - κ̂) l̂` over the rod's voronoi junctions.
pub fn bending_energy(rod: &RodView<'_>) -> f64 {
    let kappa = rod.voronoi_vector(VoronoiVector::Kappa);
    let rest = rod.voronoi_vector(VoronoiVector::RestKappa);
    let bend = rod.voronoi_matrix(VoronoiMatrix::BendMatrix);
    let lengths = rod.voronoi_scalar(VoronoiScalar::RestVoronoiLengths);
    kappa
        .iter()
        .zip(rest)
        .zip(bend.iter().zip(lengths))
        .map(|((k, k0), (b, &l))| {
            let d = *k - *k0;
            0.5 * d.dot(*b * d) * l
        })
        .sum()
}

/// `½ Σ (σ - σ̂) · S (σ - σ̂) l̂` over the rod's elements.
pub fn shear_energy(rod: &RodView<'_>) -> f64 {
    let sigma = rod.element_vector(ElementVector::Sigma);
    let rest = rod.element_vector(ElementVector::RestSigma);
    let shear = rod.element_matrix(ElementMatrix::ShearMatrix);
    let lengths = rod.element_scalar(ElementScalar::RestLengths);
    sigma
        .iter()
        .zip(rest)
        .zip(shear.iter().zip(lengths))
        .map(|((s, s0), (m, &l))| {
            let d = *s - *s0;
            0.5 * d.dot(*m * d) * l
        })
        .sum()
}

/// Mass-weighted mean node position.
pub fn center_of_mass(rod: &RodView<'_>) -> DVec3 {
    let mass = rod.mass();
    let total: f64 = mass.iter().sum();
    let weighted = rod
        .position()
        .iter()
        .zip(mass)
        .fold(DVec3::ZERO, |acc, (x, &m)| acc + *x * m);
    weighted / total
}

/// Translational plus rotational kinetic energy of every rod in the block.
///
/// Ghost and periodic slots are excluded.
pub fn kinetic_energy(block: &MemoryBlock) -> f64 {
    (0..block.n_rods())
        .map(|k| {
            let rod = block.rod(k);
            translational_energy(&rod) + rotational_energy(&rod)
        })
        .sum()
}
