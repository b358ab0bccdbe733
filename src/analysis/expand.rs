//! Round-based BFS expansion (spec.md §4.3 steps 2–3): the ~35% core of
//! the engine — per-round edge/type policy, probability gates, the
//! backlink window, the AU/EO guard, and the degree-cap policy with
//! group priority and `SortBy` fallback.

use hashbrown::HashMap;
use log::debug;

use crate::bitmaps::EdgeBitmap;
use crate::direction::Direction;
use crate::graph::WorkingGraph;
use crate::object::{ObjectAdapter, ObjectStore};
use crate::registry::EdgeRegistry;
use crate::sid::{is_cross_domain_exempt, AUTHENTICATED_USERS_SID, EVERYONE_SID};
use crate::state::NodeState;
use crate::types::{NodeT, RoundT};

use super::AnalysisOptions;

struct Candidate<O> {
    m: O,
    label: EdgeBitmap,
}

/// Process every round-`r` node and return the objects newly added to `G`
/// this round (next round's frontier).
#[allow(clippy::too_many_arguments)]
pub(super) fn process_round<O, S>(
    graph: &mut WorkingGraph<O>,
    graph_state: &mut HashMap<NodeT, NodeState>,
    discovered: &mut HashMap<O, NodeState>,
    store: &S,
    registry: &EdgeRegistry<O>,
    options: &AnalysisOptions<O>,
    edges_first: &EdgeBitmap,
    edges_middle: &EdgeBitmap,
    round: RoundT,
    frontier: &[O],
) -> Vec<O>
where
    O: ObjectAdapter,
    S: ObjectStore<O>,
{
    let active_edges = if round == 1 { edges_first } else { edges_middle };
    let active_types = if round == 1 {
        &options.object_types_first
    } else {
        &options.object_types_middle
    };

    let mut newly_added = Vec::new();

    for n in frontier {
        let n_handle = graph.handle(n).expect("frontier node must already be in G");

        if options.config.direction == Direction::In && options.config.dont_expand_aueo {
            if let Some(sid) = n.sid() {
                if sid == *EVERYONE_SID || sid == *AUTHENTICATED_USERS_SID {
                    debug!("round {}: skipping expansion of AU/EO node", round);
                    continue;
                }
            }
        }

        let n_acc = graph_state[&n_handle].accumulated_probability;
        let raw_edges = store.edges(n, options.config.direction);

        let mut candidates: Vec<Candidate<O>> = Vec::new();
        for (m, label) in raw_edges {
            let detected = label.intersect(active_edges);
            if detected.is_blank() {
                continue;
            }
            if let Some(types) = active_types {
                if !types.is_empty() && !types.contains(&m.object_type()) {
                    continue;
                }
            }
            let (prob_src, prob_dst) = if options.config.direction == Direction::In {
                (&m, n)
            } else {
                (n, &m)
            };
            let p = detected.max_probability(registry, prob_src, prob_dst);
            if p == 0 {
                // spec.md §4.1: a bitmap whose max_probability is 0 for this
                // ordered pair is "no usable edge" even if count() > 0 (e.g.
                // a pure-deny ACL) — independent of MinEdgeProbability, which
                // defaults to 0 and would otherwise let it through.
                continue;
            }
            if p < options.config.min_edge_probability {
                continue;
            }
            let acc_prime = n_acc * (p as f64 / 100.0);
            if acc_prime < (options.config.min_accumulated_probability as f64 / 100.0) {
                continue;
            }

            if graph.has_node(&m) && round > 1 {
                let m_handle = graph.handle(&m).unwrap();
                if let Some(m_state) = graph_state.get(&m_handle) {
                    if m_state.process_round + options.config.backlinks <= round
                        && !is_cross_domain_exempt(&m.sid(), &n.sid())
                    {
                        continue;
                    }
                }
            }

            if let Some(filter) = &options.filter_middle {
                if !filter.evaluate(&m) {
                    continue;
                }
            }

            if !discovered.contains_key(&m) {
                discovered.insert(m.clone(), NodeState::discovered(round + 1, acc_prime));
            }
            candidates.push(Candidate { m, label: detected });
        }

        let original_count = candidates.len();
        let committed = apply_degree_cap(candidates, options, registry);
        let suppressed = original_count - committed.len();

        for candidate in committed {
            let was_in_graph = graph.has_node(&candidate.m);
            let (src, dst) = if options.config.direction == Direction::In {
                (candidate.m.clone(), n.clone())
            } else {
                (n.clone(), candidate.m.clone())
            };
            graph.add_edge(src, dst, candidate.label);

            let m_handle = graph.handle(&candidate.m).unwrap();
            if !graph_state.contains_key(&m_handle) {
                let state = discovered
                    .get(&candidate.m)
                    .copied()
                    .unwrap_or_else(|| NodeState::discovered(round + 1, n_acc));
                graph_state.insert(m_handle, state);
            }
            if !was_in_graph {
                newly_added.push(candidate.m);
            }
        }

        if suppressed > 0 {
            graph_state.get_mut(&n_handle).unwrap().can_expand = suppressed as u32;
            debug!(
                "round {}: degree cap suppressed {} candidate(s) at one node",
                round, suppressed
            );
        }
    }

    debug!(
        "round {}: {} frontier node(s) processed, {} new node(s) discovered",
        round,
        frontier.len(),
        newly_added.len()
    );

    newly_added
}

/// spec.md §4.3 degree-cap policy: group-priority commit first (while
/// there's still "room" for it), then optional `SortBy` fallback for the
/// rest, up to `MaxOutgoingConnections`.
fn apply_degree_cap<O: ObjectAdapter>(
    candidates: Vec<Candidate<O>>,
    options: &AnalysisOptions<O>,
    registry: &EdgeRegistry<O>,
) -> Vec<Candidate<O>> {
    let cap = options.config.max_outgoing_connections;
    if cap < 0 || (candidates.len() as i64) < cap {
        return candidates;
    }
    let cap = cap as usize;
    let member_of_group = registry.member_of_group();

    let group_count = member_of_group.map_or(0, |kind| {
        candidates.iter().filter(|c| c.label.is_set(kind)).count()
    });

    let sort_descending = |pool: &mut Vec<Candidate<O>>| {
        if let Some(key) = &options.config.sort_by {
            pool.sort_by(|a, b| {
                let va = a.m.attr_int(key).unwrap_or(0);
                let vb = b.m.attr_int(key).unwrap_or(0);
                vb.cmp(&va)
            });
        }
    };

    if let Some(member_of_group) = member_of_group.filter(|_| group_count < cap) {
        let (group, mut rest): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|c| c.label.is_set(member_of_group));
        let budget = cap - group.len();
        sort_descending(&mut rest);
        let mut committed = group;
        committed.extend(rest.into_iter().take(budget));
        committed
    } else {
        let mut pool = candidates;
        sort_descending(&mut pool);
        pool.into_iter().take(cap).collect()
    }
}
