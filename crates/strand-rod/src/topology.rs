//! Rod topology classes.
//!
//! A straight (open) rod has one more node than elements and one fewer
//! voronoi junction than elements. A ring (closed) rod wraps around, so
//! nodes, elements and voronoi junctions all have the same count.

use serde::{Deserialize, Serialize};

/// Topology class of a rod. Rods are packed into one memory block per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RodTopology {
    /// Open rod with two free ends.
    Straight,
    /// Closed rod whose last element connects back to the first node.
    Ring,
}

impl RodTopology {
    /// Both classes, in packing order.
    pub const ALL: [RodTopology; 2] = [RodTopology::Straight, RodTopology::Ring];

    /// Node count for a rod of `n_elems` elements.
    #[inline]
    pub fn n_nodes(self, n_elems: usize) -> usize {
        match self {
            RodTopology::Straight => n_elems + 1,
            RodTopology::Ring => n_elems,
        }
    }

    /// Voronoi count for a rod of `n_elems` elements.
    #[inline]
    pub fn n_voronoi(self, n_elems: usize) -> usize {
        match self {
            RodTopology::Straight => n_elems.saturating_sub(1),
            RodTopology::Ring => n_elems,
        }
    }

    /// Smallest element count the dynamics update supports.
    #[inline]
    pub fn min_elems(self) -> usize {
        match self {
            RodTopology::Straight => 2,
            RodTopology::Ring => 3,
        }
    }
}

/// The three discretization domains of a rod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Node,
    Element,
    Voronoi,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Node, Domain::Element, Domain::Voronoi];

    /// Size of this domain for a rod of `n_elems` elements.
    pub fn size(self, topology: RodTopology, n_elems: usize) -> usize {
        match self {
            Domain::Node => topology.n_nodes(n_elems),
            Domain::Element => n_elems,
            Domain::Voronoi => topology.n_voronoi(n_elems),
        }
    }
}
