//! Strongly-typed identifiers for simulation entities.
//!
//! Newtype wrappers prevent accidental mixing of rod handles
//! with memory-block indices or rigid-body indices.

use serde::{Deserialize, Serialize};

/// Handle to a rod appended to a system collection (insertion order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RodId(pub u32);

/// Index of a memory block inside a finalized collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u16);

/// Handle to a rigid body appended to a system collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RigidBodyId(pub u32);

impl RodId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl BlockId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl RigidBodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for RodId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u16> for BlockId {
    fn from(val: u16) -> Self {
        Self(val)
    }
}

impl From<u32> for RigidBodyId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
