//! # strand-contact
//!
//! Penalty contact between rods and rigid cylinders.
//!
//! Each contact contributor runs two phases on every acceleration
//! evaluation:
//! 1. **Broad phase**: one bounding box per body; disjoint boxes skip the pair
//! 2. **Narrow phase**: element capsule distances and penalty forces
//!
//! Contributors plug into the solver as [`ForceContributor`](strand_solver::ForceContributor)s
//! and keep a [`ContactResult`] of their last pass for telemetry.

pub mod broad;
pub mod contact;
pub mod cylinder;
pub mod narrow;
pub mod response;
pub mod rod_rod;
pub mod self_collision;

pub use broad::{prune_using_aabbs_rod_rigid_body, prune_using_aabbs_rod_rod, Aabb};
pub use contact::ContactParams;
pub use cylinder::RodCylinderContact;
pub use narrow::{
    calculate_contact_forces_rod_rigid_body, calculate_contact_forces_rod_rod,
    calculate_contact_forces_self_rod, find_min_dist, RodSegments, SegmentDistance,
};
pub use response::ContactResult;
pub use rod_rod::RodRodContact;
pub use self_collision::SelfContact;
