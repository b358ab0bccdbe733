//! End-to-end coverage of the numbered worked scenarios and the three
//! cross-cutting laws (idempotence, monotonicity, direction duality).

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use ctrlgraph::{analyze, AnalysisOptions, Direction, EdgeBitmap, ProgressEvent, ProgressFn};

use common::{registry_with_zero_probability_kind, seed_by_id, two_kind_registry, Fixture, Node};

#[test]
fn trivial_seed_survives_with_nothing_removed() {
    let mut fx = Fixture::new();
    let target = fx.node(Node::new(1));
    let (registry, _member_of, _generic) = two_kind_registry(80);

    let options = AnalysisOptions::<Node>::new().with_filter_first(seed_by_id(1));
    let results = analyze(&fx.store(), &registry, &options);

    assert_eq!(results.graph.order(), 1);
    assert!(results.graph.has_node(&target));
    assert_eq!(results.removed, 0);
}

#[test]
fn linear_chain_is_cut_at_the_depth_cap() {
    let mut fx = Fixture::new();
    let (registry, member_of, _generic) = two_kind_registry(80);
    let n1 = fx.node(Node::new(1));
    let n2 = fx.node(Node::new(2));
    let n3 = fx.node(Node::new(3));
    let n4 = fx.node(Node::new(4));
    fx.edge(&n1, &n2, EdgeBitmap::single(member_of));
    fx.edge(&n2, &n3, EdgeBitmap::single(member_of));
    fx.edge(&n3, &n4, EdgeBitmap::single(member_of));

    let options = AnalysisOptions::<Node>::new()
        .with_direction(Direction::Out)
        .with_filter_first(seed_by_id(1))
        .with_max_depth(2);
    let results = analyze(&fx.store(), &registry, &options);

    assert!(results.graph.has_node(&n1));
    assert!(results.graph.has_node(&n2));
    assert!(results.graph.has_node(&n3));
    assert!(!results.graph.has_node(&n4));
}

#[test]
fn accumulated_probability_cutoff_stops_a_weak_path() {
    let mut fx = Fixture::new();
    let (registry, _member_of, generic) = two_kind_registry(40);
    let n1 = fx.node(Node::new(1));
    let n2 = fx.node(Node::new(2));
    let n3 = fx.node(Node::new(3));
    fx.edge(&n1, &n2, EdgeBitmap::single(generic));
    fx.edge(&n2, &n3, EdgeBitmap::single(generic));

    let options = AnalysisOptions::<Node>::new()
        .with_direction(Direction::Out)
        .with_filter_first(seed_by_id(1))
        .with_min_accumulated_probability(20);
    let results = analyze(&fx.store(), &registry, &options);

    assert!(results.graph.has_node(&n2));
    assert!(!results.graph.has_node(&n3));
}

#[test]
fn a_pure_deny_edge_is_never_usable_regardless_of_thresholds() {
    let mut fx = Fixture::new();
    let (registry, _member_of, _generic, deny) = registry_with_zero_probability_kind(80);
    let n1 = fx.node(Node::new(1));
    let n2 = fx.node(Node::new(2));
    fx.edge(&n1, &n2, EdgeBitmap::single(deny));

    let options = AnalysisOptions::<Node>::new()
        .with_direction(Direction::Out)
        .with_filter_first(seed_by_id(1));
    let results = analyze(&fx.store(), &registry, &options);

    assert_eq!(results.graph.order(), 1);
    assert!(!results.graph.has_node(&n2));
}

#[test]
fn degree_cap_favors_group_membership_over_the_rest() {
    let mut fx = Fixture::new();
    let (registry, member_of, generic) = two_kind_registry(80);
    let seed = fx.node(Node::new(0));

    let mut groups = Vec::new();
    for i in 1..=5 {
        let g = fx.node(Node::new(i));
        fx.edge(&seed, &g, EdgeBitmap::single(member_of));
        groups.push(g);
    }
    let mut rest = Vec::new();
    for i in 6..=15 {
        let r = fx.node(Node::new(i).with_rank(i as i64));
        fx.edge(&seed, &r, EdgeBitmap::single(generic));
        rest.push(r);
    }

    let options = AnalysisOptions::<Node>::new()
        .with_direction(Direction::Out)
        .with_filter_first(seed_by_id(0))
        .with_max_outgoing_connections(6)
        .with_sort_by("rank");
    let results = analyze(&fx.store(), &registry, &options);

    for g in &groups {
        assert!(results.graph.has_node(g));
    }
    let surviving_rest = rest.iter().filter(|r| results.graph.has_node(r)).count();
    assert_eq!(surviving_rest, 1);
}

#[test]
fn authenticated_users_is_not_expanded_by_default() {
    let mut fx = Fixture::new();
    let (registry, member_of, _generic) = two_kind_registry(80);
    let target = fx.node(Node::new(1));
    let aueo = fx
        .node(Node::new(2))
        .with_sid(ctrlgraph::Sid::new(&[1, 5, 11]));
    let far = fx.node(Node::new(3));
    fx.edge(&aueo, &target, EdgeBitmap::single(member_of));
    fx.edge(&far, &aueo, EdgeBitmap::single(member_of));

    let options = AnalysisOptions::<Node>::new()
        .with_direction(Direction::In)
        .with_filter_first(seed_by_id(1));
    let results = analyze(&fx.store(), &registry, &options);

    assert!(results.graph.has_node(&aueo));
    assert!(!results.graph.has_node(&far));
}

#[test]
fn outer_trim_fixpoint_strips_a_chain_of_disallowed_kinds() {
    let mut fx = Fixture::new();
    let (registry, member_of, generic) = two_kind_registry(80);
    let n1 = fx.node(Node::new(1));
    let n2 = fx.node(Node::new(2));
    let n3 = fx.node(Node::new(3));
    fx.edge(&n1, &n2, EdgeBitmap::single(generic));
    fx.edge(&n2, &n3, EdgeBitmap::single(generic));

    let options = AnalysisOptions::<Node>::new()
        .with_direction(Direction::Out)
        .with_filter_first(seed_by_id(1))
        .with_edges_first(EdgeBitmap::single(generic))
        .with_edges_middle(EdgeBitmap::single(generic))
        .with_edges_last(EdgeBitmap::single(member_of));
    let results = analyze(&fx.store(), &registry, &options);

    assert_eq!(results.graph.order(), 1);
    assert!(results.graph.has_node(&n1));
}

#[test]
fn repeated_analysis_over_the_same_inputs_is_idempotent() {
    let mut fx = Fixture::new();
    let (registry, member_of, _generic) = two_kind_registry(80);
    let n1 = fx.node(Node::new(1));
    let n2 = fx.node(Node::new(2));
    fx.edge(&n1, &n2, EdgeBitmap::single(member_of));

    let options = AnalysisOptions::<Node>::new()
        .with_direction(Direction::Out)
        .with_filter_first(seed_by_id(1));
    let first = analyze(&fx.store(), &registry, &options);
    let second = analyze(&fx.store(), &registry, &options);

    assert_eq!(first.graph.order(), second.graph.order());
    assert_eq!(first.graph.size(), second.graph.size());
    assert_eq!(first.removed, second.removed);
}

#[test]
fn wider_depth_never_removes_nodes_a_narrower_depth_kept() {
    let mut fx = Fixture::new();
    let (registry, member_of, _generic) = two_kind_registry(80);
    let n1 = fx.node(Node::new(1));
    let n2 = fx.node(Node::new(2));
    let n3 = fx.node(Node::new(3));
    fx.edge(&n1, &n2, EdgeBitmap::single(member_of));
    fx.edge(&n2, &n3, EdgeBitmap::single(member_of));

    let narrow = AnalysisOptions::<Node>::new()
        .with_direction(Direction::Out)
        .with_filter_first(seed_by_id(1))
        .with_max_depth(1);
    let wide = AnalysisOptions::<Node>::new()
        .with_direction(Direction::Out)
        .with_filter_first(seed_by_id(1))
        .with_max_depth(2);

    let narrow_results = analyze(&fx.store(), &registry, &narrow);
    let wide_results = analyze(&fx.store(), &registry, &wide);

    for o in narrow_results.graph.iterate_nodes() {
        assert!(wide_results.graph.has_node(&o));
    }
}

#[test]
fn node_budget_prune_tie_break_is_idempotent_for_a_fixed_random_state() {
    let mut fx = Fixture::new();
    let (registry, member_of, _generic) = two_kind_registry(80);
    let target = fx.node(Node::new(0));
    let mut preds = Vec::new();
    for i in 1..=6 {
        let p = fx.node(Node::new(i));
        fx.edge(&p, &target, EdgeBitmap::single(member_of));
        preds.push(p);
    }

    let options = AnalysisOptions::<Node>::new()
        .with_direction(Direction::In)
        .with_filter_first(seed_by_id(0))
        .with_node_limit(4);

    let first = analyze(&fx.store(), &registry, &options);
    let second = analyze(&fx.store(), &registry, &options);

    assert_eq!(first.graph.order(), 4);
    assert_eq!(second.graph.order(), 4);
    for p in &preds {
        assert_eq!(first.graph.has_node(p), second.graph.has_node(p));
    }
}

#[test]
fn progress_observer_sees_begin_then_per_round_advances_then_end() {
    let mut fx = Fixture::new();
    let (registry, member_of, _generic) = two_kind_registry(80);
    let n1 = fx.node(Node::new(1));
    let n2 = fx.node(Node::new(2));
    let n3 = fx.node(Node::new(3));
    fx.edge(&n1, &n2, EdgeBitmap::single(member_of));
    fx.edge(&n2, &n3, EdgeBitmap::single(member_of));

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    let observer = ProgressFn(move |e: ProgressEvent| sink.borrow_mut().push(e));

    let options = AnalysisOptions::<Node>::new()
        .with_direction(Direction::Out)
        .with_filter_first(seed_by_id(1))
        .with_progress(Box::new(observer));
    let results = analyze(&fx.store(), &registry, &options);

    let seen = events.borrow();
    assert!(matches!(seen.first(), Some(ProgressEvent::Begin)));
    assert!(matches!(seen.last(), Some(ProgressEvent::End { .. })));
    assert!(seen
        .iter()
        .any(|e| matches!(e, ProgressEvent::Advance { .. })));
    assert!(results.graph.has_node(&n3));
}

#[test]
fn direction_duality_mirrors_the_edge_orientation() {
    let mut fx = Fixture::new();
    let (registry, member_of, _generic) = two_kind_registry(80);
    let n1 = fx.node(Node::new(1));
    let n2 = fx.node(Node::new(2));
    fx.edge(&n1, &n2, EdgeBitmap::single(member_of));

    let seeded_at_n2 = AnalysisOptions::<Node>::new()
        .with_direction(Direction::In)
        .with_filter_first(seed_by_id(2));
    let seeded_at_n1 = AnalysisOptions::<Node>::new()
        .with_direction(Direction::Out)
        .with_filter_first(seed_by_id(1));

    let from_n2 = analyze(&fx.store(), &registry, &seeded_at_n2);
    let from_n1 = analyze(&fx.store(), &registry, &seeded_at_n1);

    assert_eq!(from_n2.graph.order(), 2);
    assert_eq!(from_n1.graph.order(), 2);
}
