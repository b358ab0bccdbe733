//! Expansion engine entry point (spec.md §4.3) and post-filter pipeline
//! (spec.md §4.4), wired together the way the teacher crate wires a public
//! operation (e.g. `GraphBuilder::build`) across several private helper
//! files that each own one phase.

mod expand;
mod prune;
mod seed;
mod trim;

use std::cell::RefCell;

use hashbrown::HashMap;
use log::info;

use crate::bitmaps::EdgeBitmap;
use crate::direction::Direction;
use crate::filter::NodeFilter;
use crate::graph::WorkingGraph;
use crate::object::{ObjectAdapter, ObjectStore};
use crate::progress::{ProgressEvent, ProgressObserver};
use crate::registry::EdgeRegistry;
use crate::state::NodeState;
use crate::types::{NodeT, Probability};

/// The scalar knobs of [`AnalysisOptions`] that can be serialized as-is —
/// everything except the type-parameterized filters and type sets, which a
/// caller builds in code against the concrete `O: ObjectAdapter` it uses.
/// Kept as its own `serde`-derived struct so a caller embedding this crate
/// in a larger service can load a named query preset from disk without
/// this crate taking a position on the file format (SPEC_FULL.md §D).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisConfig {
    pub direction: Direction,
    /// `-1` means unbounded.
    pub max_depth: i64,
    /// `-1` means unbounded.
    pub max_outgoing_connections: i64,
    pub backlinks: u32,
    pub min_edge_probability: Probability,
    pub min_accumulated_probability: Probability,
    pub prune_islands: bool,
    pub dont_expand_aueo: bool,
    /// `0` means unlimited.
    pub node_limit: u32,
    pub sort_by: Option<String>,
    /// Seed for the node-budget prune's tie-break RNG (spec.md §4.3 step 5,
    /// §9 "not a guaranteed keep-top-K ... approximation"). Fixed rather
    /// than entropy-drawn so that re-running `analyze` over the same store
    /// and options is idempotent (spec.md §8), matching the teacher crate's
    /// own `SmallRng::seed_from_u64` convention rather than
    /// `SmallRng::from_entropy`.
    pub random_state: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            direction: Direction::In,
            max_depth: -1,
            max_outgoing_connections: -1,
            backlinks: 0,
            min_edge_probability: 0,
            min_accumulated_probability: 0,
            prune_islands: false,
            dont_expand_aueo: true,
            node_limit: 0,
            sort_by: None,
            random_state: 0xDEAD_BEEF,
        }
    }
}

/// Full engine configuration: the serializable [`AnalysisConfig`] plus the
/// per-tier node filters, type sets and edge-kind bitmaps spec.md §4.3
/// describes. Construct with [`AnalysisOptions::new`] and the `with_*`
/// builder setters, mirroring the teacher crate's `GraphBuilder` setter
/// style (`set_directed`, `set_default_weight`, ...).
pub struct AnalysisOptions<O: ObjectAdapter> {
    pub config: AnalysisConfig,
    pub filter_first: Option<Box<dyn NodeFilter<O>>>,
    pub filter_middle: Option<Box<dyn NodeFilter<O>>>,
    pub filter_last: Option<Box<dyn NodeFilter<O>>>,
    pub object_types_first: Option<hashbrown::HashSet<O::TypeTag>>,
    pub object_types_middle: Option<hashbrown::HashSet<O::TypeTag>>,
    pub object_types_last: Option<hashbrown::HashSet<O::TypeTag>>,
    pub edges_first: EdgeBitmap,
    pub edges_middle: EdgeBitmap,
    pub edges_last: EdgeBitmap,
    /// Optional begin/advance/end side channel (spec.md §5/§9). `None` by
    /// default; the engine never requires one to run to completion. Held
    /// behind a `RefCell` so `analyze` can invoke it through a shared
    /// `&AnalysisOptions` the same way every other option is read.
    pub progress: Option<RefCell<Box<dyn ProgressObserver>>>,
}

impl<O: ObjectAdapter> Default for AnalysisOptions<O> {
    fn default() -> Self {
        AnalysisOptions {
            config: AnalysisConfig::default(),
            filter_first: None,
            filter_middle: None,
            filter_last: None,
            object_types_first: None,
            object_types_middle: None,
            object_types_last: None,
            edges_first: EdgeBitmap::blank(),
            edges_middle: EdgeBitmap::blank(),
            edges_last: EdgeBitmap::blank(),
            progress: None,
        }
    }
}

impl<O: ObjectAdapter> AnalysisOptions<O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.config.direction = direction;
        self
    }

    pub fn with_max_depth(mut self, max_depth: i64) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn with_max_outgoing_connections(mut self, max_outgoing_connections: i64) -> Self {
        self.config.max_outgoing_connections = max_outgoing_connections;
        self
    }

    pub fn with_backlinks(mut self, backlinks: u32) -> Self {
        self.config.backlinks = backlinks;
        self
    }

    pub fn with_min_edge_probability(mut self, p: Probability) -> Self {
        self.config.min_edge_probability = p;
        self
    }

    pub fn with_min_accumulated_probability(mut self, p: Probability) -> Self {
        self.config.min_accumulated_probability = p;
        self
    }

    pub fn with_prune_islands(mut self, prune_islands: bool) -> Self {
        self.config.prune_islands = prune_islands;
        self
    }

    pub fn with_dont_expand_aueo(mut self, dont_expand_aueo: bool) -> Self {
        self.config.dont_expand_aueo = dont_expand_aueo;
        self
    }

    pub fn with_node_limit(mut self, node_limit: u32) -> Self {
        self.config.node_limit = node_limit;
        self
    }

    pub fn with_sort_by(mut self, key: impl Into<String>) -> Self {
        self.config.sort_by = Some(key.into());
        self
    }

    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.config.random_state = random_state;
        self
    }

    pub fn with_filter_first(mut self, f: Box<dyn NodeFilter<O>>) -> Self {
        self.filter_first = Some(f);
        self
    }

    pub fn with_filter_middle(mut self, f: Box<dyn NodeFilter<O>>) -> Self {
        self.filter_middle = Some(f);
        self
    }

    pub fn with_filter_last(mut self, f: Box<dyn NodeFilter<O>>) -> Self {
        self.filter_last = Some(f);
        self
    }

    pub fn with_edges_first(mut self, b: EdgeBitmap) -> Self {
        self.edges_first = b;
        self
    }

    pub fn with_edges_middle(mut self, b: EdgeBitmap) -> Self {
        self.edges_middle = b;
        self
    }

    pub fn with_edges_last(mut self, b: EdgeBitmap) -> Self {
        self.edges_last = b;
        self
    }

    pub fn with_progress(mut self, observer: Box<dyn ProgressObserver>) -> Self {
        self.progress = Some(RefCell::new(observer));
        self
    }

    /// Emit one [`ProgressEvent`] to the configured observer, if any.
    fn emit_progress(&self, event: ProgressEvent) {
        if let Some(cell) = &self.progress {
            cell.borrow_mut().on_event(event);
        }
    }
}

/// `AnalysisResults` (spec.md §6): the produced working graph plus the
/// count of nodes removed by the post-filter pipeline (trim + budget +
/// island pruning — not expansion growth, per invariant 6).
pub struct AnalysisResults<O: ObjectAdapter> {
    pub graph: WorkingGraph<O>,
    pub removed: usize,
}

/// Run one attack-path expansion and pruning analysis (spec.md §4.3–4.4).
///
/// Total over every input: always returns a (possibly empty) graph, never
/// an `Err` (spec.md §7 — the core itself cannot fail).
pub fn analyze<O, S>(store: &S, registry: &EdgeRegistry<O>, options: &AnalysisOptions<O>) -> AnalysisResults<O>
where
    O: ObjectAdapter,
    S: ObjectStore<O>,
{
    // spec.md §6: "EdgesFirst/Middle/Last: Universe (all kinds) if all
    // three are empty" — applied once, at entry.
    let (edges_first, edges_middle, edges_last) =
        if options.edges_first.is_blank() && options.edges_middle.is_blank() && options.edges_last.is_blank() {
            let universe = registry.universe();
            (universe, universe, universe)
        } else {
            (options.edges_first, options.edges_middle, options.edges_last)
        };

    options.emit_progress(ProgressEvent::Begin);

    let mut graph: WorkingGraph<O> = WorkingGraph::new("analysis");
    let mut graph_state: HashMap<NodeT, NodeState> = HashMap::new();
    let mut discovered: HashMap<O, NodeState> = HashMap::new();

    let mut frontier = seed::seed(&mut graph, &mut graph_state, &mut discovered, store, options);

    let mut round: u32 = 1;
    loop {
        if !(options.config.max_depth == -1 || (round as i64) <= options.config.max_depth) {
            break;
        }
        if frontier.is_empty() {
            break;
        }
        let order_before = graph.order();
        let next = expand::process_round(
            &mut graph,
            &mut graph_state,
            &mut discovered,
            store,
            registry,
            options,
            &edges_first,
            &edges_middle,
            round,
            &frontier,
        );
        options.emit_progress(ProgressEvent::Advance {
            round,
            order: graph.order(),
            size: graph.size(),
        });
        if graph.order() == order_before {
            break;
        }
        frontier = next;
        round += 1;
    }

    let order_after_expansion = graph.order();

    trim::trim_outer_layer(&mut graph, options.config.direction, &edges_last, &options.object_types_last, &options.filter_last);
    prune::prune_to_node_limit(
        &mut graph,
        &graph_state,
        options.config.direction,
        options.config.node_limit,
        options.config.random_state,
    );
    prune::prune_islands(&mut graph, options.config.prune_islands);
    prune::finalize(&mut graph, &graph_state, options.config.direction);

    let final_order = graph.order();
    let removed = order_after_expansion - final_order;
    info!(
        "analysis complete: {} node(s), {} edge(s), removed {}",
        final_order,
        graph.size(),
        removed
    );
    options.emit_progress(ProgressEvent::End {
        order: final_order,
        size: graph.size(),
        removed,
    });

    AnalysisResults { graph, removed }
}
