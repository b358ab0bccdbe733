//! Shared in-memory fixture for integration tests: a tiny adapter/store
//! pair built by listing nodes and labeled edges up front, mirroring the
//! toy store in `bin/analyze_cli.rs` but general enough to wire up each
//! scenario below without per-test boilerplate.

use hashbrown::HashMap;

use ctrlgraph::filter::FilterFn;
use ctrlgraph::{Direction, EdgeBitmap, EdgeKind, EdgeRegistry, NodeFilter, ObjectAdapter, ObjectStore, Sid};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Node {
    pub id: u32,
    pub kind: &'static str,
    pub sid: Option<Sid>,
    pub rank: i64,
}

impl Node {
    pub fn new(id: u32) -> Self {
        Node { id, kind: "generic", sid: None, rank: 0 }
    }

    pub fn with_kind(mut self, kind: &'static str) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_sid(mut self, sid: Sid) -> Self {
        self.sid = Some(sid);
        self
    }

    pub fn with_rank(mut self, rank: i64) -> Self {
        self.rank = rank;
        self
    }
}

impl ObjectAdapter for Node {
    type TypeTag = &'static str;

    fn object_type(&self) -> &'static str {
        self.kind
    }

    fn sid(&self) -> Option<Sid> {
        self.sid.clone()
    }

    fn attr_int(&self, key: &str) -> Option<i64> {
        match key {
            "rank" => Some(self.rank),
            _ => None,
        }
    }
}

#[derive(Default)]
pub struct Fixture {
    pub nodes: Vec<Node>,
    forward: HashMap<u32, Vec<(u32, EdgeBitmap)>>,
    backward: HashMap<u32, Vec<(u32, EdgeBitmap)>>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&mut self, n: Node) -> Node {
        self.nodes.push(n.clone());
        n
    }

    pub fn edge(&mut self, src: &Node, dst: &Node, label: EdgeBitmap) {
        self.forward
            .entry(src.id)
            .or_default()
            .push((dst.id, label));
        self.backward
            .entry(dst.id)
            .or_default()
            .push((src.id, label));
    }

    pub fn store(&self) -> FixtureStore {
        FixtureStore {
            nodes: self.nodes.clone(),
            forward: self.forward.clone(),
            backward: self.backward.clone(),
        }
    }
}

pub struct FixtureStore {
    nodes: Vec<Node>,
    forward: HashMap<u32, Vec<(u32, EdgeBitmap)>>,
    backward: HashMap<u32, Vec<(u32, EdgeBitmap)>>,
}

impl ObjectStore<Node> for FixtureStore {
    fn objects(&self) -> Box<dyn Iterator<Item = Node> + '_> {
        Box::new(self.nodes.iter().cloned())
    }

    fn edges(&self, o: &Node, dir: Direction) -> Box<dyn Iterator<Item = (Node, EdgeBitmap)> + '_> {
        let table = match dir {
            Direction::Out => &self.forward,
            Direction::In => &self.backward,
        };
        let by_id = move |id: u32| self.nodes.iter().find(|n| n.id == id).unwrap().clone();
        match table.get(&o.id) {
            Some(edges) => Box::new(edges.iter().map(move |&(id, bm)| (by_id(id), bm))),
            None => Box::new(std::iter::empty()),
        }
    }
}

/// `FilterFirst` that seeds exactly the node with the given id.
pub fn seed_by_id(id: u32) -> Box<dyn NodeFilter<Node>> {
    Box::new(FilterFn(move |n: &Node| n.id == id))
}

/// A two-kind registry: `MemberOf` (marked as the group kind, probability
/// always 100) and `GenericAll` (probability fixed at construction time).
pub fn two_kind_registry(generic_probability: u8) -> (EdgeRegistry<Node>, EdgeKind, EdgeKind) {
    let mut registry: EdgeRegistry<Node> = EdgeRegistry::new();
    let member_of = registry.register("MemberOf", |_, _| 100).unwrap();
    registry.mark_member_of_group(member_of);
    let generic = registry
        .register("GenericAll", move |_, _| generic_probability)
        .unwrap();
    (registry, member_of, generic)
}

/// A three-kind registry like [`two_kind_registry`] plus `DenyAcl`, a kind
/// whose probability function always returns 0 (a pure-deny ACL: `count() >
/// 0` but `max_probability` is 0 for every pair).
pub fn registry_with_zero_probability_kind(
    generic_probability: u8,
) -> (EdgeRegistry<Node>, EdgeKind, EdgeKind, EdgeKind) {
    let (mut registry, member_of, generic) = two_kind_registry(generic_probability);
    let deny = registry.register("DenyAcl", |_, _| 0).unwrap();
    (registry, member_of, generic, deny)
}
