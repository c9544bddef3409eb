//! Narrow phase: segment distances and penalty contact forces.
//!
//! Every element is a capsule: a segment `x + s e`, `s ∈ [0, 1]`, swept by
//! the element radius. For each candidate pair the penetration is
//! `γ = (r_i + r_j) - d` where `d` is the segment distance. Pairs with
//! `γ < -CONTACT_GAP_TOLERANCE` are skipped. The net force along the unit
//! separation `n̂` is
//!
//! ```text
//! F = (F_normal + ½ H(γ) (k γ + ν v·n̂)) n̂
//! ```
//!
//! where `F_normal` is the compressive part of the equilibrium force
//! between the two bodies (absent in self-contact) and `H` is the
//! Heaviside step. Element forces go to both element nodes in full, except
//! on a rod's first element which splits them 2/3 and 4/3.

use glam::DVec3;
use strand_rod::Cylinder;
use strand_types::constants::{CONTACT_GAP_TOLERANCE, PARALLEL_TOLERANCE, SLIP_EPSILON};

use crate::contact::ContactParams;
use crate::response::ContactResult;

/// Shortest connection between two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentDistance {
    /// From the closest point on the first segment to the closest point on
    /// the second.
    pub vector: DVec3,
    /// Parameter of the closest point on the first segment.
    pub t: f64,
    /// Parameter of the closest point on the second segment.
    pub s: f64,
}

/// Minimum distance between `x1 + t e1` and `x2 + s e2`, `s, t ∈ [0, 1]`.
///
/// Non-parallel segments use the unconstrained minimizer when it lies
/// inside both segments, otherwise the best of the four edge-clamped
/// candidates. Near-parallel segments project one onto the other.
pub fn find_min_dist(x1: DVec3, e1: DVec3, x2: DVec3, e2: DVec3) -> SegmentDistance {
    let e1e1 = e1.dot(e1);
    let e1e2 = e1.dot(e2);
    let e2e2 = e2.dot(e2);

    let x1e1 = x1.dot(e1);
    let x1e2 = x1.dot(e2);
    let x2e1 = x2.dot(e1);
    let x2e2 = x2.dot(e2);

    let mut s;
    let mut t;

    let parallel = (1.0 - e1e2 * e1e2 / (e1e1 * e2e2)).abs() < PARALLEL_TOLERANCE;
    if parallel {
        t = ((x2e1 - x1e1) / e1e1).clamp(0.0, 1.0);
        s = ((x1e2 + t * e1e2 - x2e2) / e2e2).clamp(0.0, 1.0);
    } else {
        s = (e1e1 * (x1e2 - x2e2) + e1e2 * (x2e1 - x1e1)) / (e1e1 * e2e2 - e1e2 * e1e2);
        t = (e1e2 * s + x2e1 - x1e1) / e1e1;

        if out_of_unit(s) || out_of_unit(t) {
            s = 0.0;
            t = ((x2e1 - x1e1) / e1e1).clamp(0.0, 1.0);
            let mut best = (x1 + e1 * t - x2).length();

            let candidate_t = ((x2e1 + e1e2 - x1e1) / e1e1).clamp(0.0, 1.0);
            let d = (x1 + e1 * candidate_t - x2 - e2).length();
            if d < best {
                s = 1.0;
                t = candidate_t;
                best = d;
            }

            let candidate_s = ((x1e2 - x2e2) / e2e2).clamp(0.0, 1.0);
            let d = (x2 + e2 * candidate_s - x1).length();
            if d < best {
                s = candidate_s;
                t = 0.0;
                best = d;
            }

            let candidate_s = ((x1e2 + e1e2 - x2e2) / e2e2).clamp(0.0, 1.0);
            let d = (x2 + e2 * candidate_s - x1 - e1).length();
            if d < best {
                s = candidate_s;
                t = 1.0;
            }
        }
    }

    SegmentDistance {
        vector: x2 + e2 * s - x1 - e1 * t,
        t,
        s,
    }
}

fn out_of_unit(x: f64) -> bool {
    !(0.0..=1.0).contains(&x)
}

/// Element edges `l t`.
pub fn edges(lengths: &[f64], tangents: &[DVec3]) -> Vec<DVec3> {
    lengths.iter().zip(tangents).map(|(&l, &t)| t * l).collect()
}

/// Element capsules of one rod, as read by the contact kernels.
///
/// `x` and `edges` have one entry per element; `velocity` and
/// `internal_forces` one per node.
#[derive(Debug, Clone, Copy)]
pub struct RodSegments<'a> {
    pub x: &'a [DVec3],
    pub edges: &'a [DVec3],
    pub radius: &'a [f64],
    pub lengths: &'a [f64],
    pub velocity: &'a [DVec3],
    pub internal_forces: &'a [DVec3],
}

impl RodSegments<'_> {
    fn n_elems(&self) -> usize {
        self.x.len()
    }

    /// Mean node velocity of element `i`.
    fn element_velocity(&self, i: usize) -> DVec3 {
        0.5 * (self.velocity[i] + self.velocity[i + 1])
    }
}

/// Total (internal + external) force on element `i`, averaged from its nodes.
fn elemental_force(internal: &[DVec3], external: &[DVec3], i: usize) -> DVec3 {
    0.5 * (external[i] + external[i + 1] + internal[i] + internal[i + 1])
}

/// Adds `force` to both nodes of element `i`.
fn distribute(external: &mut [DVec3], i: usize, force: DVec3) {
    if i == 0 {
        external[i] += force * (2.0 / 3.0);
        external[i + 1] += force * (4.0 / 3.0);
    } else {
        external[i] += force;
        external[i + 1] += force;
    }
}

/// Unit separation and penetration of a candidate pair, or `None` when the
/// pair is too far apart to interact.
fn separation(
    x1: DVec3,
    e1: DVec3,
    x2: DVec3,
    e2: DVec3,
    radii_sum: f64,
    length_sum: f64,
) -> Option<(SegmentDistance, DVec3, f64)> {
    if (x1 - x2).length() >= radii_sum + length_sum {
        return None;
    }
    let closest = find_min_dist(x1, e1, x2, e2);
    let distance = closest.vector.length();
    let gamma = radii_sum - distance;
    if gamma < -CONTACT_GAP_TOLERANCE {
        return None;
    }
    Some((closest, closest.vector / distance, gamma))
}

fn heaviside(gamma: f64) -> f64 {
    if gamma > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Contact between every element of two distinct rods.
///
/// Forces on the first rod point away from the second and vice versa.
pub fn calculate_contact_forces_rod_rod(
    one: &RodSegments<'_>,
    one_external_forces: &mut [DVec3],
    two: &RodSegments<'_>,
    two_external_forces: &mut [DVec3],
    params: &ContactParams,
) -> ContactResult {
    let mut result = ContactResult::default();
    for i in 0..one.n_elems() {
        for j in 0..two.n_elems() {
            let Some((_, normal, gamma)) = separation(
                one.x[i],
                one.edges[i],
                two.x[j],
                two.edges[j],
                one.radius[i] + two.radius[j],
                one.lengths[i] + two.lengths[j],
            ) else {
                continue;
            };

            let equilibrium = -elemental_force(one.internal_forces, one_external_forces, i)
                + elemental_force(two.internal_forces, two_external_forces, j);
            let normal_force = equilibrium.dot(normal).min(0.0).abs();

            let interpenetration_velocity = one.element_velocity(i) - two.element_velocity(j);
            let damping = params.nu * interpenetration_velocity.dot(normal);
            let net = normal * (normal_force + 0.5 * heaviside(gamma) * (damping + params.k * gamma));

            distribute(one_external_forces, i, -net);
            distribute(two_external_forces, j, net);
            result.record(gamma, net.length());
        }
    }
    result
}

/// Contact between every element of a rod and a rigid cylinder.
///
/// Adds slip friction `-min(c_v |v_slip|, μ |F_n|) v̂_slip` on the cylinder
/// (and the opposite on the rod) and accumulates the cylinder's contact
/// torque about its center, rotated into its local frame.
pub fn calculate_contact_forces_rod_rigid_body(
    rod: &RodSegments<'_>,
    rod_external_forces: &mut [DVec3],
    cylinder: &mut Cylinder,
    params: &ContactParams,
) -> ContactResult {
    let mut result = ContactResult::default();
    let center = cylinder.position;
    let tip = cylinder.tip();
    let edge = cylinder.edge();

    let mut total_force = DVec3::ZERO;
    let mut total_torque = DVec3::ZERO;
    for i in 0..rod.n_elems() {
        let Some((closest, normal, gamma)) = separation(
            rod.x[i],
            rod.edges[i],
            tip,
            edge,
            rod.radius[i] + cylinder.radius,
            rod.lengths[i] + cylinder.length,
        ) else {
            continue;
        };
        let contact_point = tip + edge * closest.s;

        let equilibrium = -elemental_force(rod.internal_forces, rod_external_forces, i) + cylinder.external_forces;
        let normal_force = equilibrium.dot(normal).min(0.0).abs();

        let interpenetration_velocity = cylinder.velocity - rod.element_velocity(i);
        let damping = params.nu * interpenetration_velocity.dot(normal);
        let net = normal * (normal_force + 0.5 * heaviside(gamma) * (damping + params.k * gamma));

        distribute(rod_external_forces, i, -net);
        total_force += 2.0 * net;
        total_torque += (contact_point - center).cross(2.0 * net);

        let slip = interpenetration_velocity - normal * interpenetration_velocity.dot(normal);
        let slip_speed = slip.length();
        let friction = slip / (slip_speed + SLIP_EPSILON)
            * (params.friction_coefficient * net.length()).min(params.velocity_damping_coefficient * slip_speed);
        rod_external_forces[i] += 0.5 * friction;
        rod_external_forces[i + 1] += 0.5 * friction;
        total_force -= friction;
        total_torque -= (contact_point - center).cross(friction);

        result.record(gamma, net.length());
    }

    cylinder.external_forces += total_force;
    cylinder.external_torques += cylinder.director * total_torque;
    result
}

/// Contact between non-neighbouring elements of one rod.
///
/// Element `i` only tests elements `j ≤ i - skip` with
/// `skip = 1 + ceil(0.8 π r_i / l_i)`, so adjacent elements that always
/// overlap near a joint are never paired.
pub fn calculate_contact_forces_self_rod(
    rod: &RodSegments<'_>,
    external_forces: &mut [DVec3],
    params: &ContactParams,
) -> ContactResult {
    let mut result = ContactResult::default();
    for i in 0..rod.n_elems() {
        // A zero length saturates the cast, leaving the element unpaired.
        let skip = ((0.8 * std::f64::consts::PI * rod.radius[i] / rod.lengths[i]).ceil() as usize).saturating_add(1);
        if i < skip {
            continue;
        }
        for j in (0..=i - skip).rev() {
            let Some((_, normal, gamma)) = separation(
                rod.x[i],
                rod.edges[i],
                rod.x[j],
                rod.edges[j],
                rod.radius[i] + rod.radius[j],
                rod.lengths[i] + rod.lengths[j],
            ) else {
                continue;
            };

            let interpenetration_velocity = rod.element_velocity(i) - rod.element_velocity(j);
            let damping = params.nu * interpenetration_velocity.dot(normal);
            let net = normal * (0.5 * heaviside(gamma) * (damping + params.k * gamma));

            external_forces[i] -= net;
            external_forces[i + 1] -= net;
            distribute(external_forces, j, net);
            result.record(gamma, net.length());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_segments_meet_inside() {
        let d = find_min_dist(
            DVec3::new(-1.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(0.0, -1.0, 1.0),
            DVec3::new(0.0, 2.0, 0.0),
        );
        assert!((d.vector - DVec3::new(0.0, 0.0, 1.0)).length() < 1e-14);
        assert!((d.t - 0.5).abs() < 1e-14);
        assert!((d.s - 0.5).abs() < 1e-14);
    }

    #[test]
    fn clamps_to_nearest_endpoint() {
        // Second segment lies beyond the end of the first.
        let d = find_min_dist(DVec3::ZERO, DVec3::X, DVec3::new(2.0, 0.0, -1.0), DVec3::new(0.0, 0.0, 2.0));
        assert!((d.vector - DVec3::new(1.0, 0.0, 0.0)).length() < 1e-14);
        assert_eq!(d.t, 1.0);
        assert!((d.s - 0.5).abs() < 1e-14);
    }

    #[test]
    fn parallel_segments_project() {
        let d = find_min_dist(DVec3::ZERO, DVec3::X, DVec3::new(0.5, 1.0, 0.0), DVec3::X);
        assert!((d.vector - DVec3::Y).length() < 1e-14);
        assert_eq!(d.t, 0.5);
        assert_eq!(d.s, 0.0);
    }

    #[test]
    fn first_element_splits_two_thirds() {
        let mut f = vec![DVec3::ZERO; 3];
        distribute(&mut f, 0, DVec3::X);
        distribute(&mut f, 1, DVec3::X);
        assert!((f[0].x - 2.0 / 3.0).abs() < 1e-15);
        assert!((f[1].x - 7.0 / 3.0).abs() < 1e-15);
        assert_eq!(f[2].x, 1.0);
    }
}
