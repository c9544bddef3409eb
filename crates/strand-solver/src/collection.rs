//! The system collection: rods and rigid bodies advanced together.
//!
//! Rods are appended as standalone [`CosseratRod`]s and packed into memory
//! blocks by [`SystemCollection::finalize`]. After that the collection owns
//! only the blocks; rods are addressed by the [`RodId`] returned on append.

use strand_rod::dynamics::{
    compute_internal_forces_and_torques, update_accelerations, update_dynamics, update_kinematics,
    zero_external_loads,
};
use strand_rod::{
    construct, rod_loads_pair, CosseratRod, Cylinder, MemoryBlock, RodHandle, RodLoads, RodView,
    RodViewMut,
};
use strand_types::{BlockId, RigidBodyId, RodId, StrandError, StrandResult};

use crate::forcing::ForceContributor;

/// Rods and rigid bodies of one simulation.
#[derive(Debug, Default)]
pub struct SystemCollection {
    pending: Vec<CosseratRod>,
    blocks: Vec<MemoryBlock>,
    /// Packed location of every rod, indexed by [`RodId`].
    handles: Vec<RodHandle>,
    cylinders: Vec<Cylinder>,
    finalized: bool,
}

impl SystemCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a rod for packing. Fails once the collection is finalized.
    pub fn append_rod(&mut self, rod: CosseratRod) -> StrandResult<RodId> {
        if self.finalized {
            return Err(StrandError::InvalidConfig(
                "cannot append a rod to a finalized collection".into(),
            ));
        }
        let id = RodId(self.pending.len() as u32);
        self.pending.push(rod);
        Ok(id)
    }

    /// Adds a rigid cylinder. Rigid bodies are not packed and may be added
    /// at any time.
    pub fn append_cylinder(&mut self, cylinder: Cylinder) -> RigidBodyId {
        let id = RigidBodyId(self.cylinders.len() as u32);
        self.cylinders.push(cylinder);
        id
    }

    /// Packs all appended rods into memory blocks.
    pub fn finalize(&mut self) -> StrandResult<()> {
        if self.finalized {
            return Err(StrandError::InvalidConfig("collection is already finalized".into()));
        }
        let n_rods = self.pending.len();
        self.blocks = if n_rods == 0 {
            Vec::new()
        } else {
            construct(std::mem::take(&mut self.pending))?
        };
        self.handles = vec![RodHandle { block: 0, rod: 0 }; n_rods];
        for (b, block) in self.blocks.iter().enumerate() {
            for (k, &system) in block.system_idx().iter().enumerate() {
                self.handles[system] = RodHandle { block: b, rod: k };
            }
        }
        self.finalized = true;
        tracing::info!(
            n_rods,
            n_blocks = self.blocks.len(),
            n_cylinders = self.cylinders.len(),
            "finalized system collection"
        );
        Ok(())
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn n_rods(&self) -> usize {
        if self.finalized {
            self.handles.len()
        } else {
            self.pending.len()
        }
    }

    pub fn n_cylinders(&self) -> usize {
        self.cylinders.len()
    }

    // ─── Rod access ───

    fn ensure_finalized(&self) -> StrandResult<()> {
        if !self.finalized {
            return Err(StrandError::InvalidConfig(
                "collection must be finalized before rods are accessed".into(),
            ));
        }
        Ok(())
    }

    /// Block and in-block index of a packed rod.
    pub fn rod_handle(&self, id: RodId) -> StrandResult<RodHandle> {
        self.ensure_finalized()?;
        self.handles
            .get(id.index())
            .copied()
            .ok_or_else(|| StrandError::InvalidConfig(format!("unknown rod {id:?}")))
    }

    pub fn rod(&self, id: RodId) -> StrandResult<RodView<'_>> {
        let h = self.rod_handle(id)?;
        Ok(self.blocks[h.block].rod(h.rod))
    }

    pub fn rod_mut(&mut self, id: RodId) -> StrandResult<RodViewMut<'_>> {
        let h = self.rod_handle(id)?;
        Ok(self.blocks[h.block].rod_mut(h.rod))
    }

    /// Kinematics and load accumulators of one rod.
    pub fn rod_loads(&mut self, id: RodId) -> StrandResult<RodLoads<'_>> {
        let h = self.rod_handle(id)?;
        Ok(self.blocks[h.block].rod_loads(h.rod))
    }

    /// Kinematics and load accumulators of two distinct rods.
    pub fn rod_loads_pair(&mut self, a: RodId, b: RodId) -> StrandResult<(RodLoads<'_>, RodLoads<'_>)> {
        let (ha, hb) = (self.rod_handle(a)?, self.rod_handle(b)?);
        rod_loads_pair(&mut self.blocks, ha, hb)
    }

    /// One rod's loads together with a cylinder.
    pub fn rod_loads_and_cylinder(
        &mut self,
        rod: RodId,
        cylinder: RigidBodyId,
    ) -> StrandResult<(RodLoads<'_>, &mut Cylinder)> {
        let h = self.rod_handle(rod)?;
        let body = self
            .cylinders
            .get_mut(cylinder.index())
            .ok_or_else(|| StrandError::InvalidConfig(format!("unknown rigid body {cylinder:?}")))?;
        Ok((self.blocks[h.block].rod_loads(h.rod), body))
    }

    /// Every packed rod id, in append order.
    pub fn rod_ids(&self) -> impl Iterator<Item = RodId> {
        (0..self.handles.len() as u32).map(RodId)
    }

    // ─── Block and rigid body access ───

    pub fn blocks(&self) -> &[MemoryBlock] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [MemoryBlock] {
        &mut self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&MemoryBlock> {
        self.blocks.get(id.index())
    }

    pub fn cylinder(&self, id: RigidBodyId) -> StrandResult<&Cylinder> {
        self.cylinders
            .get(id.index())
            .ok_or_else(|| StrandError::InvalidConfig(format!("unknown rigid body {id:?}")))
    }

    pub fn cylinder_mut(&mut self, id: RigidBodyId) -> StrandResult<&mut Cylinder> {
        self.cylinders
            .get_mut(id.index())
            .ok_or_else(|| StrandError::InvalidConfig(format!("unknown rigid body {id:?}")))
    }

    pub fn cylinders(&self) -> &[Cylinder] {
        &self.cylinders
    }

    pub fn cylinders_mut(&mut self) -> &mut [Cylinder] {
        &mut self.cylinders
    }

    // ─── Stepping ───

    /// Kinematic sub-step of every block and rigid body.
    pub fn kinematic_step(&mut self, dt: f64) {
        for block in &mut self.blocks {
            update_kinematics(block, dt);
        }
        for cylinder in &mut self.cylinders {
            cylinder.update_kinematics(dt);
        }
    }

    /// Dynamic sub-step of every block and rigid body.
    pub fn dynamic_step(&mut self, dt: f64) {
        for block in &mut self.blocks {
            update_dynamics(block, dt);
        }
        for cylinder in &mut self.cylinders {
            cylinder.update_dynamics(dt);
        }
    }

    /// One acceleration evaluation.
    ///
    /// Clears the external accumulators, recomputes internal loads of every
    /// block, runs the force contributors in registration order and turns
    /// the summed loads into accelerations. A degenerate rod is reported
    /// with its [`RodId`].
    pub fn compute_accelerations(
        &mut self,
        forcing: &mut [Box<dyn ForceContributor>],
        time: f64,
    ) -> StrandResult<()> {
        self.ensure_finalized()?;
        for block in &mut self.blocks {
            zero_external_loads(block);
            compute_internal_forces_and_torques(block).map_err(|e| match e {
                StrandError::PhysicalState { rod, index, reason } => StrandError::PhysicalState {
                    rod: block.system_idx()[rod],
                    index,
                    reason,
                },
                other => other,
            })?;
        }
        for cylinder in &mut self.cylinders {
            cylinder.zero_external_loads();
        }
        for contributor in forcing.iter_mut() {
            contributor.apply(self, time)?;
        }
        for block in &mut self.blocks {
            update_accelerations(block);
        }
        for cylinder in &mut self.cylinders {
            cylinder.update_accelerations();
        }
        Ok(())
    }

    /// Kinetic energy of all rods and rigid bodies.
    pub fn kinetic_energy(&self) -> f64 {
        let rods: f64 = self.blocks.iter().map(strand_rod::dynamics::kinetic_energy).sum();
        let bodies: f64 = self.cylinders.iter().map(Cylinder::kinetic_energy).sum();
        rods + bodies
    }
}
