//! Outer-layer trim-to-fixpoint (spec.md §4.4 step 1): repeatedly strip
//! outer nodes that fail the `Last` policy until none remain to strip.

use log::debug;

use crate::bitmaps::EdgeBitmap;
use crate::direction::Direction;
use crate::filter::NodeFilter;
use crate::graph::WorkingGraph;
use crate::object::ObjectAdapter;

/// Strip outer nodes failing `FilterLast`/`ObjectTypesLast`/`EdgesLast`
/// until a fixpoint is reached. A node with no incident edge in the
/// reversed direction is left alone here; it is either interior (has
/// edges the other way) or a true island, handled by island pruning.
pub(super) fn trim_outer_layer<O: ObjectAdapter>(
    graph: &mut WorkingGraph<O>,
    direction: Direction,
    edges_last: &EdgeBitmap,
    object_types_last: &Option<hashbrown::HashSet<O::TypeTag>>,
    filter_last: &Option<Box<dyn NodeFilter<O>>>,
) {
    let incident_dir = direction.reversed();

    loop {
        let outer = graph.outer_nodes(direction);
        if outer.is_empty() {
            break;
        }

        let mut to_remove = Vec::new();
        for o in &outer {
            let incident = graph.edges(o, incident_dir);
            if incident.is_empty() {
                continue;
            }

            if let Some(filter) = filter_last {
                if !filter.evaluate(o) {
                    to_remove.push(o.clone());
                    continue;
                }
            }
            if let Some(types) = object_types_last {
                if !types.is_empty() && !types.contains(&o.object_type()) {
                    to_remove.push(o.clone());
                    continue;
                }
            }
            let has_permitted_edge = incident
                .iter()
                .any(|(_, label)| !label.intersect(edges_last).is_blank());
            if !has_permitted_edge {
                to_remove.push(o.clone());
            }
        }

        if to_remove.is_empty() {
            break;
        }
        debug!("outer-trim pass removed {} node(s)", to_remove.len());
        for o in &to_remove {
            graph.delete_node(o);
        }
    }
}
