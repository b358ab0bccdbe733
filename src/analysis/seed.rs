//! Round-1 seeding (spec.md §4.3 step 1).

use hashbrown::HashMap;
use log::info;

use crate::graph::{NodeDataValue, WorkingGraph};
use crate::object::{ObjectAdapter, ObjectStore};
use crate::state::NodeState;
use crate::types::NodeT;

use super::AnalysisOptions;

/// Evaluate `FilterFirst` against the external object population; every
/// match becomes a round-1 seed marked `"target"`.
pub(super) fn seed<O, S>(
    graph: &mut WorkingGraph<O>,
    graph_state: &mut HashMap<NodeT, NodeState>,
    discovered: &mut HashMap<O, NodeState>,
    store: &S,
    options: &AnalysisOptions<O>,
) -> Vec<O>
where
    O: ObjectAdapter,
    S: ObjectStore<O>,
{
    let mut seeds = Vec::new();
    for o in store.objects() {
        let matches = options
            .filter_first
            .as_ref()
            .map_or(true, |f| f.evaluate(&o));
        if !matches {
            continue;
        }
        let handle = graph.add_node(o.clone());
        graph.set_node_data(&o, "target", NodeDataValue::Bool(true));
        let state = NodeState::seed();
        graph_state.insert(handle, state);
        discovered.insert(o.clone(), state);
        seeds.push(o);
    }
    info!("seeded {} target node(s)", seeds.len());
    seeds
}
