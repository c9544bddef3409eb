//! Memory blocks: many rods packed into contiguous per-attribute arrays.
//!
//! Rods of one topology class share a block. Consecutive rods are separated
//! by ghost slots so the block-wide quadrature/difference kernels never
//! blend values of two different rods.
//!
//! Straight layout (rod of `n` elements starting at offset `S`):
//!
//! ```text
//! nodes:    S .. S+n        real     S+n+1            ghost
//! elements: S .. S+n-1      real     S+n, S+n+1       ghost
//! voronoi:  S .. S+n-2      real     S+n-1 .. S+n+1   ghost
//! ```
//!
//! Ring layout (rod of `n` elements starting at offset `S`):
//!
//! ```text
//! nodes:    S ← S+n   |  S+1 .. S+n real  |  S+n+1 ← S+1, S+n+2 ← S+2  |  S+n+3 ghost
//! elements: S ← S+n   |  S+1 .. S+n real  |  S+n+1 ← S+1               |  S+n+2, S+n+3 ghost
//! voronoi:             S .. S+n-1 real    |  S+n ← S                   |  S+n+1 .. S+n+3 ghost
//! ```
//!
//! `a ← b` marks a periodic copy that is refreshed from its real counterpart
//! before every kinematics evaluation. Ghost slots are only inserted between
//! rods, never after the last one.

use std::ops::Range;

use glam::{DMat3, DVec3};
use strand_types::{StrandError, StrandResult};

use crate::fields::RodFields;
use crate::system::{
    ElementMatrix, ElementScalar, ElementVector, NodeScalar, NodeVector, RodSystem, VoronoiMatrix,
    VoronoiScalar, VoronoiVector,
};
use crate::topology::{Domain, RodTopology};

/// Location of a packed rod: block index and rod index within the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RodHandle {
    pub block: usize,
    pub rod: usize,
}

/// Per-domain offset table of a block.
#[derive(Debug, Clone, Default)]
pub(crate) struct DomainLayout {
    pub(crate) start: Vec<usize>,
    pub(crate) end: Vec<usize>,
    pub(crate) ghosts: Vec<usize>,
    /// `(destination, source)` periodic copies.
    pub(crate) periodic: Vec<(usize, usize)>,
}

/// Temporaries reused by the dynamics update.
#[derive(Debug, Clone)]
pub(crate) struct Scratch {
    pub(crate) elem_a: Vec<DVec3>,
    pub(crate) elem_b: Vec<DVec3>,
    pub(crate) voronoi: Vec<DVec3>,
}

/// Block-owned storage for a group of rods of one topology class.
#[derive(Debug, Clone)]
pub struct MemoryBlock {
    topology: RodTopology,
    pub(crate) fields: RodFields,
    system_idx: Vec<usize>,
    pub(crate) nodes: DomainLayout,
    pub(crate) elems: DomainLayout,
    pub(crate) voronoi: DomainLayout,
    pub(crate) scratch: Scratch,
}

/// Packs `systems` into one block per topology class.
///
/// Straight rods land in the first block and ring rods in the second; input
/// order is preserved within each block and recorded in
/// [`MemoryBlock::system_idx`]. The rods are consumed: the blocks own the
/// only copy of their data afterwards.
pub fn construct<S: RodSystem>(systems: Vec<S>) -> StrandResult<Vec<MemoryBlock>> {
    let mut blocks = Vec::new();
    for topology in RodTopology::ALL {
        let (idx, group): (Vec<usize>, Vec<&S>) = systems
            .iter()
            .enumerate()
            .filter(|(_, s)| s.topology() == topology)
            .unzip();
        if group.is_empty() {
            continue;
        }
        blocks.push(MemoryBlock::from_systems(&group, idx, topology)?);
    }
    tracing::debug!(
        n_systems = systems.len(),
        n_blocks = blocks.len(),
        "packed rods into memory blocks"
    );
    Ok(blocks)
}

/// Packs a homogeneous group of rods into a single block.
///
/// Fails with [`StrandError::Packing`] if any system is not of `topology`.
pub fn construct_block<S: RodSystem>(systems: &[S], topology: RodTopology) -> StrandResult<MemoryBlock> {
    let group: Vec<&S> = systems.iter().collect();
    MemoryBlock::from_systems(&group, (0..systems.len()).collect(), topology)
}

/// Checks every attribute slice of `system` against its domain size.
pub(crate) fn check_system_shapes<S: RodSystem + ?Sized>(system: &S, k: usize) -> StrandResult<()> {
    let topology = system.topology();
    let n_elems = system.n_elems();
    if n_elems < topology.min_elems() {
        return Err(StrandError::Packing(format!(
            "system {k}: {topology:?} rod needs at least {} elements, got {n_elems}",
            topology.min_elems()
        )));
    }
    let n_nodes = system.n_nodes();
    let n_voronoi = system.n_voronoi();
    let check = |name: String, len: usize, expected: usize| -> StrandResult<()> {
        if len != expected {
            return Err(StrandError::Packing(format!(
                "system {k}: {name} has length {len}, expected {expected}"
            )));
        }
        Ok(())
    };
    for a in NodeScalar::ALL {
        check(format!("{a:?}"), system.node_scalar(a).len(), n_nodes)?;
    }
    for a in NodeVector::ALL {
        check(format!("{a:?}"), system.node_vector(a).len(), n_nodes)?;
    }
    for a in ElementScalar::ALL {
        check(format!("{a:?}"), system.element_scalar(a).len(), n_elems)?;
    }
    for a in ElementVector::ALL {
        check(format!("{a:?}"), system.element_vector(a).len(), n_elems)?;
    }
    for a in ElementMatrix::ALL {
        check(format!("{a:?}"), system.element_matrix(a).len(), n_elems)?;
    }
    for a in VoronoiScalar::ALL {
        check(format!("{a:?}"), system.voronoi_scalar(a).len(), n_voronoi)?;
    }
    for a in VoronoiVector::ALL {
        check(format!("{a:?}"), system.voronoi_vector(a).len(), n_voronoi)?;
    }
    for a in VoronoiMatrix::ALL {
        check(format!("{a:?}"), system.voronoi_matrix(a).len(), n_voronoi)?;
    }
    Ok(())
}

fn copy_into<T: Copy>(dst: &mut [T], range: Range<usize>, src: &[T]) {
    dst[range].copy_from_slice(src);
}

fn copy_periodic<T: Copy>(data: &mut [T], pairs: &[(usize, usize)]) {
    for &(dst, src) in pairs {
        data[dst] = data[src];
    }
}

/// Splits two disjoint ranges of `data` into independent mutable slices.
fn split_pair<T>(data: &mut [T], a: Range<usize>, b: Range<usize>) -> (&mut [T], &mut [T]) {
    if a.start < b.start {
        let (lo, hi) = data.split_at_mut(b.start);
        (&mut lo[a], &mut hi[..b.end - b.start])
    } else {
        let (lo, hi) = data.split_at_mut(a.start);
        (&mut hi[..a.end - a.start], &mut lo[b])
    }
}

impl MemoryBlock {
    fn from_systems<S: RodSystem + ?Sized>(
        systems: &[&S],
        system_idx: Vec<usize>,
        topology: RodTopology,
    ) -> StrandResult<Self> {
        if systems.is_empty() {
            return Err(StrandError::Packing("cannot pack an empty group of rods".into()));
        }
        for (k, system) in systems.iter().enumerate() {
            if system.topology() != topology {
                return Err(StrandError::Packing(format!(
                    "system {k} is a {:?} rod but the block holds {topology:?} rods",
                    system.topology()
                )));
            }
            check_system_shapes(*system, k)?;
        }

        let (nodes, elems, voronoi, n_nodes) = Self::layout(systems, topology);
        let n_elems = n_nodes - 1;
        let n_voronoi = n_nodes - 2;
        let mut fields = RodFields::with_sizes(n_nodes, n_elems, n_voronoi);

        for (k, system) in systems.iter().enumerate() {
            let nr = nodes.start[k]..nodes.end[k];
            let er = elems.start[k]..elems.end[k];
            let vr = voronoi.start[k]..voronoi.end[k];
            for a in NodeScalar::ALL {
                copy_into(fields.node_scalar_mut(a), nr.clone(), system.node_scalar(a));
            }
            for a in NodeVector::ALL {
                copy_into(fields.node_vector_mut(a), nr.clone(), system.node_vector(a));
            }
            for a in ElementScalar::ALL {
                copy_into(fields.element_scalar_mut(a), er.clone(), system.element_scalar(a));
            }
            for a in ElementVector::ALL {
                copy_into(fields.element_vector_mut(a), er.clone(), system.element_vector(a));
            }
            for a in ElementMatrix::ALL {
                copy_into(fields.element_matrix_mut(a), er.clone(), system.element_matrix(a));
            }
            for a in VoronoiScalar::ALL {
                copy_into(fields.voronoi_scalar_mut(a), vr.clone(), system.voronoi_scalar(a));
            }
            for a in VoronoiVector::ALL {
                copy_into(fields.voronoi_vector_mut(a), vr.clone(), system.voronoi_vector(a));
            }
            for a in VoronoiMatrix::ALL {
                copy_into(fields.voronoi_matrix_mut(a), vr.clone(), system.voronoi_matrix(a));
            }
        }

        // Periodic copies carry every attribute, including rest quantities.
        for a in NodeScalar::ALL {
            copy_periodic(fields.node_scalar_mut(a), &nodes.periodic);
        }
        for a in NodeVector::ALL {
            copy_periodic(fields.node_vector_mut(a), &nodes.periodic);
        }
        for a in ElementScalar::ALL {
            copy_periodic(fields.element_scalar_mut(a), &elems.periodic);
        }
        for a in ElementVector::ALL {
            copy_periodic(fields.element_vector_mut(a), &elems.periodic);
        }
        for a in ElementMatrix::ALL {
            copy_periodic(fields.element_matrix_mut(a), &elems.periodic);
        }
        for a in VoronoiScalar::ALL {
            copy_periodic(fields.voronoi_scalar_mut(a), &voronoi.periodic);
        }
        for a in VoronoiVector::ALL {
            copy_periodic(fields.voronoi_vector_mut(a), &voronoi.periodic);
        }
        for a in VoronoiMatrix::ALL {
            copy_periodic(fields.voronoi_matrix_mut(a), &voronoi.periodic);
        }

        // Separator nodes get unit mass so accelerations stay finite.
        for &g in &nodes.ghosts {
            fields.mass[g] = 1.0;
        }

        let scratch = Scratch {
            elem_a: vec![DVec3::ZERO; n_elems],
            elem_b: vec![DVec3::ZERO; n_elems],
            voronoi: vec![DVec3::ZERO; n_voronoi],
        };

        tracing::debug!(
            ?topology,
            n_rods = systems.len(),
            n_nodes,
            n_elems,
            n_voronoi,
            "constructed memory block"
        );

        Ok(Self {
            topology,
            fields,
            system_idx,
            nodes,
            elems,
            voronoi,
            scratch,
        })
    }

    /// Computes per-domain offsets, ghost slots and periodic copies.
    fn layout<S: RodSystem + ?Sized>(
        systems: &[&S],
        topology: RodTopology,
    ) -> (DomainLayout, DomainLayout, DomainLayout, usize) {
        let mut nodes = DomainLayout::default();
        let mut elems = DomainLayout::default();
        let mut voronoi = DomainLayout::default();
        let mut offset = 0;
        let last = systems.len() - 1;

        for (k, system) in systems.iter().enumerate() {
            let n = system.n_elems();
            let s = offset;
            match topology {
                RodTopology::Straight => {
                    nodes.start.push(s);
                    nodes.end.push(s + n + 1);
                    elems.start.push(s);
                    elems.end.push(s + n);
                    voronoi.start.push(s);
                    voronoi.end.push(s + n - 1);
                    if k != last {
                        nodes.ghosts.push(s + n + 1);
                        elems.ghosts.extend([s + n, s + n + 1]);
                        voronoi.ghosts.extend([s + n - 1, s + n, s + n + 1]);
                    }
                    offset += n + 2;
                }
                RodTopology::Ring => {
                    nodes.start.push(s + 1);
                    nodes.end.push(s + n + 1);
                    elems.start.push(s + 1);
                    elems.end.push(s + n + 1);
                    voronoi.start.push(s);
                    voronoi.end.push(s + n);
                    nodes.periodic.extend([(s, s + n), (s + n + 1, s + 1), (s + n + 2, s + 2)]);
                    elems.periodic.extend([(s, s + n), (s + n + 1, s + 1)]);
                    voronoi.periodic.push((s + n, s));
                    if k != last {
                        nodes.ghosts.push(s + n + 3);
                        elems.ghosts.extend([s + n + 2, s + n + 3]);
                        voronoi.ghosts.extend([s + n + 1, s + n + 2, s + n + 3]);
                    }
                    offset += n + 4;
                }
            }
        }
        // The stride of the last rod counted a separator node that does not exist.
        (nodes, elems, voronoi, offset - 1)
    }

    // ─── Layout queries ───

    pub fn topology(&self) -> RodTopology {
        self.topology
    }

    pub fn n_rods(&self) -> usize {
        self.system_idx.len()
    }

    /// Total node slots, ghosts included.
    pub fn n_nodes(&self) -> usize {
        self.fields.n_nodes()
    }

    /// Total element slots, ghosts included.
    pub fn n_elems(&self) -> usize {
        self.fields.n_elems()
    }

    /// Total voronoi slots, ghosts included.
    pub fn n_voronoi(&self) -> usize {
        self.fields.n_voronoi()
    }

    /// Position of each packed rod in the input handed to [`construct`].
    pub fn system_idx(&self) -> &[usize] {
        &self.system_idx
    }

    fn domain(&self, domain: Domain) -> &DomainLayout {
        match domain {
            Domain::Node => &self.nodes,
            Domain::Element => &self.elems,
            Domain::Voronoi => &self.voronoi,
        }
    }

    /// First slot of each rod's real range in `domain`.
    pub fn start_idx(&self, domain: Domain) -> &[usize] {
        &self.domain(domain).start
    }

    /// One past the last slot of each rod's real range in `domain`.
    pub fn end_idx(&self, domain: Domain) -> &[usize] {
        &self.domain(domain).end
    }

    /// Separator ghost slots in `domain`.
    pub fn ghost_idx(&self, domain: Domain) -> &[usize] {
        &self.domain(domain).ghosts
    }

    /// Periodic `(destination, source)` copies in `domain` (ring blocks only).
    pub fn periodic_idx(&self, domain: Domain) -> &[(usize, usize)] {
        &self.domain(domain).periodic
    }

    /// Real slot range of rod `k` in `domain`.
    ///
    /// # Panics
    /// If `k >= n_rods()`.
    pub fn rod_range(&self, domain: Domain, k: usize) -> Range<usize> {
        let layout = self.domain(domain);
        layout.start[k]..layout.end[k]
    }

    // ─── Storage ───

    /// Block-wide attribute arrays, ghost slots included.
    pub fn fields(&self) -> &RodFields {
        &self.fields
    }

    /// Mutable block-wide attribute arrays.
    ///
    /// Writes to ghost slots are overwritten by the next dynamics update.
    pub fn fields_mut(&mut self) -> &mut RodFields {
        &mut self.fields
    }

    /// Read-only view of rod `k`.
    ///
    /// # Panics
    /// If `k >= n_rods()`.
    pub fn rod(&self, k: usize) -> RodView<'_> {
        assert!(k < self.n_rods(), "rod index {k} out of range for {} rods", self.n_rods());
        RodView { block: self, index: k }
    }

    /// Mutable view of rod `k`.
    ///
    /// # Panics
    /// If `k >= n_rods()`.
    pub fn rod_mut(&mut self, k: usize) -> RodViewMut<'_> {
        assert!(k < self.n_rods(), "rod index {k} out of range for {} rods", self.n_rods());
        RodViewMut { block: self, index: k }
    }

    /// Kinematics of rod `k` together with its external load accumulators.
    pub fn rod_loads(&mut self, k: usize) -> RodLoads<'_> {
        let nr = self.rod_range(Domain::Node, k);
        let er = self.rod_range(Domain::Element, k);
        let RodFields {
            position,
            velocity,
            internal_forces,
            radius,
            lengths,
            tangents,
            director,
            external_forces,
            external_torques,
            ..
        } = &mut self.fields;
        RodLoads {
            position: &position[nr.clone()],
            velocity: &velocity[nr.clone()],
            internal_forces: &internal_forces[nr.clone()],
            radius: &radius[er.clone()],
            lengths: &lengths[er.clone()],
            tangents: &tangents[er.clone()],
            director: &director[er.clone()],
            external_forces: &mut external_forces[nr],
            external_torques: &mut external_torques[er],
        }
    }

    /// Loads of two distinct rods of this block, borrowed at once.
    pub fn rod_loads_pair(&mut self, a: usize, b: usize) -> StrandResult<(RodLoads<'_>, RodLoads<'_>)> {
        if a == b {
            return Err(StrandError::InvalidConfig(format!(
                "rod {a} cannot be paired with itself"
            )));
        }
        let (na, nb) = (self.rod_range(Domain::Node, a), self.rod_range(Domain::Node, b));
        let (ea, eb) = (self.rod_range(Domain::Element, a), self.rod_range(Domain::Element, b));
        let RodFields {
            position,
            velocity,
            internal_forces,
            radius,
            lengths,
            tangents,
            director,
            external_forces,
            external_torques,
            ..
        } = &mut self.fields;
        let (fa, fb) = split_pair(external_forces, na.clone(), nb.clone());
        let (ta, tb) = split_pair(external_torques, ea.clone(), eb.clone());
        let first = RodLoads {
            position: &position[na.clone()],
            velocity: &velocity[na.clone()],
            internal_forces: &internal_forces[na],
            radius: &radius[ea.clone()],
            lengths: &lengths[ea.clone()],
            tangents: &tangents[ea.clone()],
            director: &director[ea],
            external_forces: fa,
            external_torques: ta,
        };
        let second = RodLoads {
            position: &position[nb.clone()],
            velocity: &velocity[nb.clone()],
            internal_forces: &internal_forces[nb],
            radius: &radius[eb.clone()],
            lengths: &lengths[eb.clone()],
            tangents: &tangents[eb.clone()],
            director: &director[eb],
            external_forces: fb,
            external_torques: tb,
        };
        Ok((first, second))
    }

    /// Refreshes periodic copies from their real counterparts.
    ///
    /// Only state that evolves in time is copied: node positions and
    /// velocities, element directors and angular velocities. Rest quantities
    /// were copied at construction. No-op for straight blocks.
    pub fn synchronize_periodic(&mut self) {
        copy_periodic(&mut self.fields.position, &self.nodes.periodic);
        copy_periodic(&mut self.fields.velocity, &self.nodes.periodic);
        copy_periodic(&mut self.fields.director, &self.elems.periodic);
        copy_periodic(&mut self.fields.omega, &self.elems.periodic);
    }
}

/// Kinematics of a rod borrowed together with its external load accumulators.
///
/// Force contributors read the kinematic slices and add into
/// `external_forces` / `external_torques`.
#[derive(Debug)]
pub struct RodLoads<'a> {
    pub position: &'a [DVec3],
    pub velocity: &'a [DVec3],
    pub internal_forces: &'a [DVec3],
    pub radius: &'a [f64],
    pub lengths: &'a [f64],
    pub tangents: &'a [DVec3],
    pub director: &'a [DMat3],
    pub external_forces: &'a mut [DVec3],
    pub external_torques: &'a mut [DVec3],
}

/// Loads of two distinct rods that may live in different blocks.
pub fn rod_loads_pair(
    blocks: &mut [MemoryBlock],
    a: RodHandle,
    b: RodHandle,
) -> StrandResult<(RodLoads<'_>, RodLoads<'_>)> {
    for h in [a, b] {
        if h.block >= blocks.len() || h.rod >= blocks[h.block].n_rods() {
            return Err(StrandError::InvalidConfig(format!("no rod at {h:?}")));
        }
    }
    if a.block == b.block {
        return blocks[a.block].rod_loads_pair(a.rod, b.rod);
    }
    if a.block < b.block {
        let (lo, hi) = blocks.split_at_mut(b.block);
        Ok((lo[a.block].rod_loads(a.rod), hi[0].rod_loads(b.rod)))
    } else {
        let (lo, hi) = blocks.split_at_mut(a.block);
        let second = lo[b.block].rod_loads(b.rod);
        let first = hi[0].rod_loads(a.rod);
        Ok((first, second))
    }
}

// ─── Views ─────────────────────────────────────────────────────────────

/// Non-owning, read-only alias of one rod inside a block.
#[derive(Debug, Clone, Copy)]
pub struct RodView<'a> {
    block: &'a MemoryBlock,
    index: usize,
}

impl<'a> RodView<'a> {
    /// Rod index within its block.
    pub fn index(&self) -> usize {
        self.index
    }

    fn range(&self, domain: Domain) -> Range<usize> {
        self.block.rod_range(domain, self.index)
    }

    pub fn node_scalar(&self, attr: NodeScalar) -> &'a [f64] {
        &self.block.fields.node_scalar(attr)[self.range(Domain::Node)]
    }

    pub fn node_vector(&self, attr: NodeVector) -> &'a [DVec3] {
        &self.block.fields.node_vector(attr)[self.range(Domain::Node)]
    }

    pub fn element_scalar(&self, attr: ElementScalar) -> &'a [f64] {
        &self.block.fields.element_scalar(attr)[self.range(Domain::Element)]
    }

    pub fn element_vector(&self, attr: ElementVector) -> &'a [DVec3] {
        &self.block.fields.element_vector(attr)[self.range(Domain::Element)]
    }

    pub fn element_matrix(&self, attr: ElementMatrix) -> &'a [DMat3] {
        &self.block.fields.element_matrix(attr)[self.range(Domain::Element)]
    }

    pub fn voronoi_scalar(&self, attr: VoronoiScalar) -> &'a [f64] {
        &self.block.fields.voronoi_scalar(attr)[self.range(Domain::Voronoi)]
    }

    pub fn voronoi_vector(&self, attr: VoronoiVector) -> &'a [DVec3] {
        &self.block.fields.voronoi_vector(attr)[self.range(Domain::Voronoi)]
    }

    pub fn voronoi_matrix(&self, attr: VoronoiMatrix) -> &'a [DMat3] {
        &self.block.fields.voronoi_matrix(attr)[self.range(Domain::Voronoi)]
    }

    pub fn position(&self) -> &'a [DVec3] {
        self.node_vector(NodeVector::Position)
    }

    pub fn velocity(&self) -> &'a [DVec3] {
        self.node_vector(NodeVector::Velocity)
    }

    pub fn mass(&self) -> &'a [f64] {
        self.node_scalar(NodeScalar::Mass)
    }

    pub fn lengths(&self) -> &'a [f64] {
        self.element_scalar(ElementScalar::Lengths)
    }

    pub fn director(&self) -> &'a [DMat3] {
        self.element_matrix(ElementMatrix::Director)
    }

    pub fn omega(&self) -> &'a [DVec3] {
        self.element_vector(ElementVector::Omega)
    }
}

impl RodSystem for RodView<'_> {
    fn topology(&self) -> RodTopology {
        self.block.topology
    }

    fn n_elems(&self) -> usize {
        self.range(Domain::Element).len()
    }

    fn node_scalar(&self, attr: NodeScalar) -> &[f64] {
        RodView::node_scalar(self, attr)
    }

    fn node_vector(&self, attr: NodeVector) -> &[DVec3] {
        RodView::node_vector(self, attr)
    }

    fn element_scalar(&self, attr: ElementScalar) -> &[f64] {
        RodView::element_scalar(self, attr)
    }

    fn element_vector(&self, attr: ElementVector) -> &[DVec3] {
        RodView::element_vector(self, attr)
    }

    fn element_matrix(&self, attr: ElementMatrix) -> &[DMat3] {
        RodView::element_matrix(self, attr)
    }

    fn voronoi_scalar(&self, attr: VoronoiScalar) -> &[f64] {
        RodView::voronoi_scalar(self, attr)
    }

    fn voronoi_vector(&self, attr: VoronoiVector) -> &[DVec3] {
        RodView::voronoi_vector(self, attr)
    }

    fn voronoi_matrix(&self, attr: VoronoiMatrix) -> &[DMat3] {
        RodView::voronoi_matrix(self, attr)
    }
}

/// Non-owning, mutable alias of one rod inside a block.
#[derive(Debug)]
pub struct RodViewMut<'a> {
    block: &'a mut MemoryBlock,
    index: usize,
}

impl<'a> RodViewMut<'a> {
    /// Rod index within its block.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Reborrows as a read-only view.
    pub fn as_view(&self) -> RodView<'_> {
        RodView {
            block: &*self.block,
            index: self.index,
        }
    }

    fn range(&self, domain: Domain) -> Range<usize> {
        self.block.rod_range(domain, self.index)
    }

    pub fn n_elems(&self) -> usize {
        self.range(Domain::Element).len()
    }

    pub fn n_nodes(&self) -> usize {
        self.range(Domain::Node).len()
    }

    pub fn node_scalar_mut(&mut self, attr: NodeScalar) -> &mut [f64] {
        let r = self.range(Domain::Node);
        &mut self.block.fields.node_scalar_mut(attr)[r]
    }

    pub fn node_vector_mut(&mut self, attr: NodeVector) -> &mut [DVec3] {
        let r = self.range(Domain::Node);
        &mut self.block.fields.node_vector_mut(attr)[r]
    }

    pub fn element_scalar_mut(&mut self, attr: ElementScalar) -> &mut [f64] {
        let r = self.range(Domain::Element);
        &mut self.block.fields.element_scalar_mut(attr)[r]
    }

    pub fn element_vector_mut(&mut self, attr: ElementVector) -> &mut [DVec3] {
        let r = self.range(Domain::Element);
        &mut self.block.fields.element_vector_mut(attr)[r]
    }

    pub fn element_matrix_mut(&mut self, attr: ElementMatrix) -> &mut [DMat3] {
        let r = self.range(Domain::Element);
        &mut self.block.fields.element_matrix_mut(attr)[r]
    }

    pub fn voronoi_scalar_mut(&mut self, attr: VoronoiScalar) -> &mut [f64] {
        let r = self.range(Domain::Voronoi);
        &mut self.block.fields.voronoi_scalar_mut(attr)[r]
    }

    pub fn voronoi_vector_mut(&mut self, attr: VoronoiVector) -> &mut [DVec3] {
        let r = self.range(Domain::Voronoi);
        &mut self.block.fields.voronoi_vector_mut(attr)[r]
    }

    pub fn voronoi_matrix_mut(&mut self, attr: VoronoiMatrix) -> &mut [DMat3] {
        let r = self.range(Domain::Voronoi);
        &mut self.block.fields.voronoi_matrix_mut(attr)[r]
    }

    pub fn position_mut(&mut self) -> &mut [DVec3] {
        self.node_vector_mut(NodeVector::Position)
    }

    pub fn velocity_mut(&mut self) -> &mut [DVec3] {
        self.node_vector_mut(NodeVector::Velocity)
    }

    pub fn external_forces_mut(&mut self) -> &mut [DVec3] {
        self.node_vector_mut(NodeVector::ExternalForces)
    }

    pub fn external_torques_mut(&mut self) -> &mut [DVec3] {
        self.element_vector_mut(ElementVector::ExternalTorques)
    }

    pub fn director_mut(&mut self) -> &mut [DMat3] {
        self.element_matrix_mut(ElementMatrix::Director)
    }

    pub fn omega_mut(&mut self) -> &mut [DVec3] {
        self.element_vector_mut(ElementVector::Omega)
    }

    /// Kinematics plus external load accumulators of this rod.
    pub fn loads(&mut self) -> RodLoads<'_> {
        self.block.rod_loads(self.index)
    }
}
