//! A single, unpacked Cosserat rod.

use glam::{DMat3, DVec3};
use strand_types::{StrandError, StrandResult};

use crate::fields::RodFields;
use crate::system::{
    ElementMatrix, ElementScalar, ElementVector, NodeScalar, NodeVector, RodSystem, VoronoiMatrix,
    VoronoiScalar, VoronoiVector,
};
use crate::topology::RodTopology;

/// A Cosserat rod owning its attribute arrays.
///
/// Rods are built by the [`generators`](crate::generators), appended to a
/// system collection and consumed when the collection packs them into a
/// [`MemoryBlock`](crate::MemoryBlock).
#[derive(Debug, Clone, PartialEq)]
pub struct CosseratRod {
    topology: RodTopology,
    /// Attribute storage, sized for this rod alone.
    pub fields: RodFields,
}

impl CosseratRod {
    /// Wraps pre-filled storage, checking that every domain has the size the
    /// topology requires.
    pub fn from_fields(topology: RodTopology, fields: RodFields) -> StrandResult<Self> {
        let n_elems = fields.n_elems();
        if n_elems < topology.min_elems() {
            return Err(StrandError::Packing(format!(
                "{topology:?} rod needs at least {} elements, got {n_elems}",
                topology.min_elems()
            )));
        }
        let rod = Self { topology, fields };
        crate::memory_block::check_system_shapes(&rod, 0)?;
        Ok(rod)
    }

    /// Allocates a rod of `n_elems` elements with default values.
    pub fn with_elems(topology: RodTopology, n_elems: usize) -> StrandResult<Self> {
        let fields = RodFields::with_sizes(
            topology.n_nodes(n_elems),
            n_elems,
            topology.n_voronoi(n_elems),
        );
        Self::from_fields(topology, fields)
    }

    /// Total rod mass.
    pub fn total_mass(&self) -> f64 {
        self.fields.mass.iter().sum()
    }

    /// Sum of rest element lengths.
    pub fn rest_length(&self) -> f64 {
        self.fields.rest_lengths.iter().sum()
    }
}

impl RodSystem for CosseratRod {
    fn topology(&self) -> RodTopology {
        self.topology
    }

    fn n_elems(&self) -> usize {
        self.fields.n_elems()
    }

    fn node_scalar(&self, attr: NodeScalar) -> &[f64] {
        self.fields.node_scalar(attr)
    }

    fn node_vector(&self, attr: NodeVector) -> &[DVec3] {
        self.fields.node_vector(attr)
    }

    fn element_scalar(&self, attr: ElementScalar) -> &[f64] {
        self.fields.element_scalar(attr)
    }

    fn element_vector(&self, attr: ElementVector) -> &[DVec3] {
        self.fields.element_vector(attr)
    }

    fn element_matrix(&self, attr: ElementMatrix) -> &[DMat3] {
        self.fields.element_matrix(attr)
    }

    fn voronoi_scalar(&self, attr: VoronoiScalar) -> &[f64] {
        self.fields.voronoi_scalar(attr)
    }

    fn voronoi_vector(&self, attr: VoronoiVector) -> &[DVec3] {
        self.fields.voronoi_vector(attr)
    }

    fn voronoi_matrix(&self, attr: VoronoiMatrix) -> &[DMat3] {
        self.fields.voronoi_matrix(attr)
    }
}
