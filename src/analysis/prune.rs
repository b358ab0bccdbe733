//! Island elimination, node-budget pruning and final marking (spec.md §4.4
//! steps 2–4).

use hashbrown::HashMap;
use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::direction::Direction;
use crate::graph::{NodeDataValue, WorkingGraph};
use crate::object::ObjectAdapter;
use crate::state::NodeState;
use crate::types::NodeT;

/// Remove random outer nodes, preferring the outer layer discovered
/// latest (the farthest-from-target round), until `order() <= node_limit`.
/// `node_limit == 0` means unlimited; a no-op in that case.
///
/// `random_state` seeds the tie-break RNG deterministically (the teacher
/// crate's own `SmallRng::seed_from_u64` convention, not
/// `SmallRng::from_entropy`) so that re-running `analyze` with the same
/// options over the same store is idempotent per spec.md §8.
pub(super) fn prune_to_node_limit<O: ObjectAdapter>(
    graph: &mut WorkingGraph<O>,
    graph_state: &HashMap<NodeT, NodeState>,
    direction: Direction,
    node_limit: u32,
    random_state: u64,
) {
    if node_limit == 0 {
        return;
    }
    let mut rng = SmallRng::seed_from_u64(random_state);
    let mut removed = 0usize;

    while graph.order() > node_limit as usize {
        let outer = graph.outer_nodes(direction);
        if outer.is_empty() {
            warn!(
                "node-limit pruning stopped at {} node(s), target was {}: no outer node left to remove",
                graph.order(),
                node_limit
            );
            break;
        }

        let max_round = outer
            .iter()
            .filter_map(|o| graph.handle(o).and_then(|h| graph_state.get(&h)))
            .map(|s| s.process_round)
            .max();
        let Some(max_round) = max_round else {
            warn!(
                "node-limit pruning stopped at {} node(s), target was {}: outer nodes carry no state",
                graph.order(),
                node_limit
            );
            break;
        };

        let latest: Vec<&O> = outer
            .iter()
            .filter(|o| {
                graph
                    .handle(o)
                    .and_then(|h| graph_state.get(&h))
                    .map_or(false, |s| s.process_round == max_round)
            })
            .collect();
        let mut pool: Vec<&O> = if latest.is_empty() { outer.iter().collect() } else { latest };
        // Sort by handle before drawing: WorkingGraph's adjacency maps don't
        // guarantee stable iteration order (spec.md §4.2), but handles are
        // assigned in deterministic discovery order, so sorting here keeps
        // the rng draw itself — and hence the whole tie-break — reproducible
        // run-over-run for a fixed `random_state` (spec.md §8 idempotence).
        pool.sort_by_key(|o| graph.handle(o).unwrap());

        let pick = rng.gen_range(0, pool.len());
        let victim = pool[pick].clone();
        graph.delete_node(&victim);
        removed += 1;
    }

    if removed > 0 {
        debug!("node-limit pruning removed {} node(s)", removed);
    }
}

/// Delete every node with total degree 0, if enabled.
pub(super) fn prune_islands<O: ObjectAdapter>(graph: &mut WorkingGraph<O>, enabled: bool) {
    if !enabled {
        return;
    }
    let islands = graph.islands();
    if !islands.is_empty() {
        debug!("island pruning removed {} node(s)", islands.len());
    }
    for o in &islands {
        graph.delete_node(o);
    }
}

/// Mark `"source"` on the recomputed outer set (spec.md §4.3 step 7: "a
/// node with in-degree 0 (Direction=In) or out-degree 0 (Direction=Out)",
/// the glossary's "Outer node" — distinct from `"target"`, which `seed`
/// already marked on round-1 seeds) and `"canexpand"` on every remaining
/// node whose degree cap suppressed at least one candidate.
pub(super) fn finalize<O: ObjectAdapter>(
    graph: &mut WorkingGraph<O>,
    graph_state: &HashMap<NodeT, NodeState>,
    direction: Direction,
) {
    for o in graph.outer_nodes(direction) {
        graph.set_node_data(&o, "source", NodeDataValue::Bool(true));
    }
    for o in graph.iterate_nodes() {
        let Some(state) = graph.handle(&o).and_then(|h| graph_state.get(&h)) else {
            continue;
        };
        if state.can_expand > 0 {
            graph.set_node_data(&o, "canexpand", NodeDataValue::UInt(state.can_expand));
        }
    }
}
