//! Per-node auxiliary state (spec.md §3 "NodeState").
//!
//! Held in a side map keyed by node handle, the way the teacher's
//! `PropertyCache` (`cache.rs`) holds derived per-graph values outside the
//! main adjacency structures rather than inline in the node itself.

use crate::types::RoundT;

/// Discovery bookkeeping for one node, abandoned once the owning node is
/// deleted from the [`crate::graph::WorkingGraph`] (the side map is keyed
/// by handle and simply drops the entry on `delete_node`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeState {
    /// Round in which the node was discovered (1 for seeds).
    pub process_round: RoundT,
    /// Product of edge `max_probability`s along the discovery path, in
    /// `[0, 1]`. `1.0` at seeds.
    pub accumulated_probability: f64,
    /// Count of outgoing candidates suppressed by the degree cap. `0` if
    /// this node was never capped.
    pub can_expand: u32,
}

impl NodeState {
    pub fn seed() -> Self {
        NodeState {
            process_round: 1,
            accumulated_probability: 1.0,
            can_expand: 0,
        }
    }

    pub fn discovered(round: RoundT, accumulated_probability: f64) -> Self {
        NodeState {
            process_round: round,
            accumulated_probability,
            can_expand: 0,
        }
    }
}
