//! The rod-system capability trait and its attribute catalogue.
//!
//! Every attribute a packed rod carries is named by one of the enums below,
//! grouped by domain and value kind. [`RodSystem`] exposes each attribute as
//! a slice; the memory-block builder reads rods exclusively through it.

use glam::{DMat3, DVec3};

use crate::topology::{Domain, RodTopology};

/// Scalars stored per node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeScalar {
    Mass,
    DissipationForces,
}

/// 3-vectors stored per node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeVector {
    Position,
    Velocity,
    Acceleration,
    InternalForces,
    ExternalForces,
}

/// Scalars stored per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementScalar {
    Radius,
    Volume,
    Density,
    Lengths,
    RestLengths,
    Dilatation,
    DilatationRate,
    DissipationTorques,
}

/// 3-vectors stored per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementVector {
    Tangents,
    Sigma,
    RestSigma,
    Omega,
    Alpha,
    InternalTorques,
    ExternalTorques,
    InternalStress,
}

/// 3x3 matrices stored per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementMatrix {
    Director,
    MassSecondMoment,
    InvMassSecondMoment,
    ShearMatrix,
}

/// Scalars stored per voronoi junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoronoiScalar {
    VoronoiDilatation,
    RestVoronoiLengths,
}

/// 3-vectors stored per voronoi junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoronoiVector {
    Kappa,
    RestKappa,
    InternalCouple,
}

/// 3x3 matrices stored per voronoi junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoronoiMatrix {
    BendMatrix,
}

impl NodeScalar {
    pub const ALL: [Self; 2] = [Self::Mass, Self::DissipationForces];
}

impl NodeVector {
    pub const ALL: [Self; 5] = [
        Self::Position,
        Self::Velocity,
        Self::Acceleration,
        Self::InternalForces,
        Self::ExternalForces,
    ];
}

impl ElementScalar {
    pub const ALL: [Self; 8] = [
        Self::Radius,
        Self::Volume,
        Self::Density,
        Self::Lengths,
        Self::RestLengths,
        Self::Dilatation,
        Self::DilatationRate,
        Self::DissipationTorques,
    ];
}

impl ElementVector {
    pub const ALL: [Self; 8] = [
        Self::Tangents,
        Self::Sigma,
        Self::RestSigma,
        Self::Omega,
        Self::Alpha,
        Self::InternalTorques,
        Self::ExternalTorques,
        Self::InternalStress,
    ];
}

impl ElementMatrix {
    pub const ALL: [Self; 4] = [
        Self::Director,
        Self::MassSecondMoment,
        Self::InvMassSecondMoment,
        Self::ShearMatrix,
    ];
}

impl VoronoiScalar {
    pub const ALL: [Self; 2] = [Self::VoronoiDilatation, Self::RestVoronoiLengths];
}

impl VoronoiVector {
    pub const ALL: [Self; 3] = [Self::Kappa, Self::RestKappa, Self::InternalCouple];
}

impl VoronoiMatrix {
    pub const ALL: [Self; 1] = [Self::BendMatrix];
}

/// A discretized rod that can be packed into a memory block.
///
/// Implementors report their topology and element count and hand out every
/// attribute as a slice whose length matches the attribute's domain:
/// `n_nodes()` for node attributes, `n_elems()` for element attributes and
/// `n_voronoi()` for voronoi attributes. The builder rejects systems that
/// violate this.
pub trait RodSystem {
    /// Topology class, which selects the memory block the rod lands in.
    fn topology(&self) -> RodTopology;

    /// Number of elements.
    fn n_elems(&self) -> usize;

    /// Number of nodes.
    fn n_nodes(&self) -> usize {
        self.topology().n_nodes(self.n_elems())
    }

    /// Number of voronoi junctions.
    fn n_voronoi(&self) -> usize {
        self.topology().n_voronoi(self.n_elems())
    }

    /// Size of `domain` for this rod.
    fn domain_size(&self, domain: Domain) -> usize {
        domain.size(self.topology(), self.n_elems())
    }

    fn node_scalar(&self, attr: NodeScalar) -> &[f64];
    fn node_vector(&self, attr: NodeVector) -> &[DVec3];
    fn element_scalar(&self, attr: ElementScalar) -> &[f64];
    fn element_vector(&self, attr: ElementVector) -> &[DVec3];
    fn element_matrix(&self, attr: ElementMatrix) -> &[DMat3];
    fn voronoi_scalar(&self, attr: VoronoiScalar) -> &[f64];
    fn voronoi_vector(&self, attr: VoronoiVector) -> &[DVec3];
    fn voronoi_matrix(&self, attr: VoronoiMatrix) -> &[DMat3];
}
