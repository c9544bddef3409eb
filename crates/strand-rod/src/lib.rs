//! # strand-rod
//!
//! Cosserat rods, their packed memory-block representation, and the
//! per-substep kinematics/dynamics update.
//!
//! ## Design
//!
//! [`RodSystem`] is the capability trait every packable rod implements: it
//! reports a topology and hands out each attribute as a slice. The
//! [`memory_block`] builder consumes a list of systems and copies them into
//! block-owned arrays; rods are then accessed through non-owning
//! [`RodView`]/[`RodViewMut`] aliases. The [`dynamics`] functions run the
//! quadrature/difference kernels once per block rather than once per rod.

pub mod dynamics;
pub mod fields;
pub mod generators;
pub mod memory_block;
pub mod rigid_body;
pub mod rod;
pub mod system;
pub mod topology;

pub use fields::RodFields;
pub use memory_block::{
    construct, construct_block, rod_loads_pair, MemoryBlock, RodHandle, RodLoads, RodView,
    RodViewMut,
};
pub use rigid_body::Cylinder;
pub use rod::CosseratRod;
pub use system::{
    ElementMatrix, ElementScalar, ElementVector, NodeScalar, NodeVector, RodSystem, VoronoiMatrix,
    VoronoiScalar, VoronoiVector,
};
pub use topology::{Domain, RodTopology};
