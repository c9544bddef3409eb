//! Procedural rod generators.
//!
//! Every generator discretizes a centerline into elements, attaches a
//! circular cross-section and derives masses, inertias and stiffness
//! matrices from a [`RodMaterial`]:
//!
//! | Quantity | Value |
//! |---|---|
//! | Area `A` | `π r²` |
//! | Second moments `I1 = I2` | `A² / (4π)`, `I3 = 2 I1` |
//! | Shear matrix `S` | `diag(α G A, α G A, E A)` with `α = 4/3` |
//! | Bend matrix `B` | `diag(E I1, E I2, G I3)`, length-weighted onto voronoi |
//! | Mass inertia `J` | `ρ l̂ diag(I1, I2, I3)` |

use std::f64::consts::PI;

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};
use strand_material::RodMaterial;
use strand_math::linalg::diag;
use strand_math::rotation::{from_directors, log_rotation};
use strand_math::quadrature;
use strand_types::constants::SHEAR_CORRECTION_FACTOR;
use strand_types::{StrandError, StrandResult};

use crate::fields::RodFields;
use crate::rod::CosseratRod;
use crate::topology::RodTopology;

/// Geometry of a straight rod.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RodGeometry {
    /// Number of elements.
    pub n_elems: usize,
    /// Position of the first node.
    pub start: DVec3,
    /// Rod axis; becomes `d3`.
    pub direction: DVec3,
    /// Cross-section reference; becomes `d1` after projection off the axis.
    pub normal: DVec3,
    /// Total rest length.
    pub base_length: f64,
    /// Cross-section radius.
    pub base_radius: f64,
}

/// Geometry of a closed ring rod.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingGeometry {
    /// Number of elements (equal to the node count).
    pub n_elems: usize,
    /// Ring center.
    pub center: DVec3,
    /// Ring axis; becomes `d1` of every element.
    pub axis: DVec3,
    /// Centerline radius of the ring.
    pub ring_radius: f64,
    /// Cross-section radius.
    pub base_radius: f64,
}

/// Builds a straight rod along `geometry.direction`.
pub fn straight_rod(geometry: &RodGeometry, material: &RodMaterial) -> StrandResult<CosseratRod> {
    let direction = unit(geometry.direction, "direction")?;
    if geometry.n_elems == 0 || !(geometry.base_length > 0.0) {
        return Err(StrandError::InvalidConfig(format!(
            "straight rod needs elements and a positive length, got {} elements of total length {}",
            geometry.n_elems, geometry.base_length
        )));
    }
    let dl = geometry.base_length / geometry.n_elems as f64;
    let positions: Vec<DVec3> = (0..=geometry.n_elems)
        .map(|k| geometry.start + direction * (dl * k as f64))
        .collect();
    assemble(
        RodTopology::Straight,
        &positions,
        geometry.normal,
        geometry.base_radius,
        material,
    )
}

/// Builds a straight-topology rod through the given node positions.
///
/// Rest curvature stays zero, so a bent initial centerline starts out of
/// equilibrium.
pub fn straight_rod_from_positions(
    positions: &[DVec3],
    normal: DVec3,
    base_radius: f64,
    material: &RodMaterial,
) -> StrandResult<CosseratRod> {
    assemble(RodTopology::Straight, positions, normal, base_radius, material)
}

/// Builds a circular ring rod whose rest curvature is its initial shape.
pub fn ring_rod(geometry: &RingGeometry, material: &RodMaterial) -> StrandResult<CosseratRod> {
    let axis = unit(geometry.axis, "axis")?;
    if !(geometry.ring_radius > 0.0) {
        return Err(StrandError::InvalidConfig(format!(
            "ring radius must be positive, got {}",
            geometry.ring_radius
        )));
    }
    let helper = if axis.x.abs() < 0.9 { DVec3::X } else { DVec3::Y };
    let u = (helper - axis * helper.dot(axis)).normalize();
    let v = axis.cross(u);
    let n = geometry.n_elems;
    let positions: Vec<DVec3> = (0..n)
        .map(|k| {
            let theta = 2.0 * PI * k as f64 / n as f64;
            geometry.center + (u * theta.cos() + v * theta.sin()) * geometry.ring_radius
        })
        .collect();
    let mut rod = assemble(RodTopology::Ring, &positions, axis, geometry.base_radius, material)?;

    let fields = &mut rod.fields;
    for v in 0..n {
        let prev = (v + n - 1) % n;
        let relative = fields.director[v] * fields.director[prev].transpose();
        fields.rest_kappa[v] = -log_rotation(&relative) / fields.rest_voronoi_lengths[v];
        fields.kappa[v] = fields.rest_kappa[v];
    }
    Ok(rod)
}

fn unit(v: DVec3, name: &str) -> StrandResult<DVec3> {
    let len = v.length();
    if !len.is_finite() || len < 1e-12 {
        return Err(StrandError::InvalidConfig(format!("{name} must be a non-zero vector")));
    }
    Ok(v / len)
}

/// Shared discretization for both topologies.
fn assemble(
    topology: RodTopology,
    positions: &[DVec3],
    normal: DVec3,
    base_radius: f64,
    material: &RodMaterial,
) -> StrandResult<CosseratRod> {
    material.validate()?;
    if !(base_radius > 0.0) {
        return Err(StrandError::InvalidConfig(format!(
            "rod radius must be positive, got {base_radius}"
        )));
    }
    let n_nodes = positions.len();
    let n_elems = match topology {
        RodTopology::Straight => n_nodes.saturating_sub(1),
        RodTopology::Ring => n_nodes,
    };
    if n_elems < topology.min_elems() {
        return Err(StrandError::InvalidConfig(format!(
            "{topology:?} rod needs at least {} elements, got {n_elems}",
            topology.min_elems()
        )));
    }
    let n_voronoi = topology.n_voronoi(n_elems);
    let mut f = RodFields::with_sizes(n_nodes, n_elems, n_voronoi);
    f.position.copy_from_slice(positions);

    let area = PI * base_radius * base_radius;
    let i1 = area * area / (4.0 * PI);
    let second_moment = DVec3::new(i1, i1, 2.0 * i1);
    let e = material.youngs_modulus;
    let g = material.shear_modulus();
    let shear = diag(SHEAR_CORRECTION_FACTOR * g * area, SHEAR_CORRECTION_FACTOR * g * area, e * area);
    let element_bend = diag(e * second_moment.x, e * second_moment.y, g * second_moment.z);
    let nu = material.damping;

    for k in 0..n_elems {
        let edge = positions[(k + 1) % n_nodes] - positions[k];
        let length = edge.length();
        if !(length > 0.0) || !length.is_finite() {
            return Err(StrandError::InvalidConfig(format!(
                "element {k} has degenerate rest length {length}"
            )));
        }
        let d3 = edge / length;
        let projected = normal - d3 * normal.dot(d3);
        let d1 = unit(projected, "normal (projected off the tangent)")?;
        let d2 = d3.cross(d1);

        f.rest_lengths[k] = length;
        f.lengths[k] = length;
        f.tangents[k] = d3;
        f.director[k] = from_directors(d1, d2, d3);
        f.radius[k] = base_radius;
        f.volume[k] = area * length;
        f.density[k] = material.density;
        f.shear_matrix[k] = shear;

        let inertia = second_moment * (material.density * length);
        f.mass_second_moment_of_inertia[k] = DMat3::from_diagonal(inertia);
        f.inv_mass_second_moment_of_inertia[k] = DMat3::from_diagonal(inertia.recip());
        f.dissipation_constant_for_torques[k] = nu * length;

        let element_mass = material.density * area * length;
        f.mass[k] += 0.5 * element_mass;
        f.mass[(k + 1) % n_nodes] += 0.5 * element_mass;
    }

    // Voronoi junction v sits between elements `left` and `right`.
    for v in 0..n_voronoi {
        let (left, right) = match topology {
            RodTopology::Straight => (v, v + 1),
            RodTopology::Ring => ((v + n_elems - 1) % n_elems, v),
        };
        let (ll, lr) = (f.rest_lengths[left], f.rest_lengths[right]);
        f.rest_voronoi_lengths[v] = 0.5 * (ll + lr);
        f.bend_matrix[v] = (element_bend * ll + element_bend * lr) * (1.0 / (ll + lr));
    }

    match topology {
        RodTopology::Straight => {
            let lumped = quadrature(&f.rest_lengths)?;
            for (gamma, l) in f.dissipation_constant_for_forces.iter_mut().zip(lumped) {
                *gamma = nu * l;
            }
        }
        RodTopology::Ring => {
            for i in 0..n_nodes {
                let prev = (i + n_elems - 1) % n_elems;
                f.dissipation_constant_for_forces[i] =
                    nu * 0.5 * (f.rest_lengths[prev] + f.rest_lengths[i]);
            }
        }
    }

    CosseratRod::from_fields(topology, f)
}
