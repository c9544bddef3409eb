//! Broad phase: one axis-aligned box per body.
//!
//! A rod's box spans its node positions, padded on every side by its largest
//! radius plus its longest element. A cylinder's box is its center padded by
//! the lab-frame extent of `(r, r, L/2)`. When the two boxes are disjoint on
//! any axis the pair is pruned and the narrow phase is skipped entirely.

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// Box around a rod's nodes, padded by `max(radius) + max(length)`.
    pub fn from_rod(positions: &[DVec3], radius: &[f64], lengths: &[f64]) -> Self {
        let pad = max_of(radius) + max_of(lengths);
        let (min, max) = positions.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(lo, hi), &x| (lo.min(x), hi.max(x)),
        );
        Self {
            min: min - DVec3::splat(pad),
            max: max + DVec3::splat(pad),
        }
    }

    /// Box around a cylinder. `director` rows are `d1, d2, d3`.
    pub fn from_cylinder(center: DVec3, director: DMat3, radius: f64, length: f64) -> Self {
        let half_extent = (director.transpose() * DVec3::new(radius, radius, 0.5 * length)).abs();
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// True when the boxes are disjoint along at least one axis.
    pub fn is_disjoint(&self, other: &Aabb) -> bool {
        self.max.cmplt(other.min).any() || self.min.cmpgt(other.max).any()
    }
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

/// True when two rods cannot touch.
pub fn prune_using_aabbs_rod_rod(
    one_positions: &[DVec3],
    one_radius: &[f64],
    one_lengths: &[f64],
    two_positions: &[DVec3],
    two_radius: &[f64],
    two_lengths: &[f64],
) -> bool {
    let one = Aabb::from_rod(one_positions, one_radius, one_lengths);
    let two = Aabb::from_rod(two_positions, two_radius, two_lengths);
    two.is_disjoint(&one)
}

/// True when a rod cannot touch a cylinder.
pub fn prune_using_aabbs_rod_rigid_body(
    rod_positions: &[DVec3],
    rod_radius: &[f64],
    rod_lengths: &[f64],
    cylinder_center: DVec3,
    cylinder_director: DMat3,
    cylinder_radius: f64,
    cylinder_length: f64,
) -> bool {
    let rod = Aabb::from_rod(rod_positions, rod_radius, rod_lengths);
    let cylinder = Aabb::from_cylinder(cylinder_center, cylinder_director, cylinder_radius, cylinder_length);
    cylinder.is_disjoint(&rod)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rod_box_is_padded_by_radius_and_length() {
        let x = [DVec3::new(1.0, 0.0, 0.0), DVec3::new(3.0, 1.0, 0.0)];
        let aabb = Aabb::from_rod(&x, &[0.5], &[2.0]);
        assert_eq!(aabb.min, DVec3::new(-1.5, -2.5, -2.5));
        assert_eq!(aabb.max, DVec3::new(5.5, 3.5, 2.5));
    }

    #[test]
    fn tilted_cylinder_box_uses_lab_extent() {
        // d3 along x: the long half-axis lands on x.
        let director = DMat3::from_cols(DVec3::Z, DVec3::Y, DVec3::X).transpose();
        let aabb = Aabb::from_cylinder(DVec3::ZERO, director, 0.5, 4.0);
        assert_eq!(aabb.max, DVec3::new(2.0, 0.5, 0.5));
        assert_eq!(aabb.min, -aabb.max);
    }

    #[test]
    fn touching_boxes_are_not_disjoint() {
        let a = Aabb { min: DVec3::ZERO, max: DVec3::ONE };
        let b = Aabb { min: DVec3::ONE, max: DVec3::splat(2.0) };
        let c = Aabb { min: DVec3::new(1.1, 0.0, 0.0), max: DVec3::splat(2.0) };
        assert!(!a.is_disjoint(&b));
        assert!(a.is_disjoint(&c));
        assert!(c.is_disjoint(&a));
    }
}
