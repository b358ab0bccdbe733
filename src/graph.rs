//! Working graph (spec.md §3/§4.2): the mutable labeled multidigraph the
//! expansion engine builds up and prunes.
//!
//! Node identity is "by external pointer/handle" in spec.md; this
//! implementation backs that with a stable opaque arena index
//! ([`crate::types::NodeT`]) the way spec.md §9's design note suggests,
//! rather than raw pointers. Adjacency is a pair of `hashbrown` maps (one
//! per direction) keyed on that index, mirroring the teacher crate's own
//! choice of `hashbrown` for its node/edge maps.

use hashbrown::HashMap;

use crate::bitmaps::EdgeBitmap;
use crate::object::ObjectAdapter;
use crate::types::NodeT;

/// A value stored in a node's `nd[o][key]` data map (spec.md §3).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeDataValue {
    Bool(bool),
    UInt(u32),
}

impl NodeDataValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            NodeDataValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u32> {
        match self {
            NodeDataValue::UInt(u) => Some(*u),
            _ => None,
        }
    }
}

/// The mutable labeled multidigraph `G = (N, E, nd, ed)` of spec.md §3.
pub struct WorkingGraph<O: ObjectAdapter> {
    pub(crate) name: String,
    pub(crate) objects: HashMap<NodeT, O>,
    pub(crate) handle_of: HashMap<O, NodeT>,
    pub(crate) out_adj: HashMap<NodeT, HashMap<NodeT, EdgeBitmap>>,
    pub(crate) in_adj: HashMap<NodeT, HashMap<NodeT, EdgeBitmap>>,
    pub(crate) node_data: HashMap<NodeT, HashMap<String, NodeDataValue>>,
    pub(crate) next_handle: NodeT,
}

impl<O: ObjectAdapter> Default for WorkingGraph<O> {
    fn default() -> Self {
        WorkingGraph {
            name: "WorkingGraph".to_string(),
            objects: HashMap::new(),
            handle_of: HashMap::new(),
            out_adj: HashMap::new(),
            in_adj: HashMap::new(),
            node_data: HashMap::new(),
            next_handle: 0,
        }
    }
}

impl<O: ObjectAdapter> core::fmt::Display for WorkingGraph<O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "WorkingGraph({}, order={}, size={})",
            self.name,
            self.order(),
            self.size()
        )
    }
}

impl<O: ObjectAdapter> WorkingGraph<O> {
    pub fn new(name: impl Into<String>) -> Self {
        WorkingGraph {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Number of nodes, `|N|`.
    pub fn order(&self) -> usize {
        self.objects.len()
    }

    /// Number of edges, `|E|`.
    pub fn size(&self) -> usize {
        self.out_adj.values().map(|m| m.len()).sum()
    }

    /// `true` if `o` is already a node of this graph.
    pub fn has_node(&self, o: &O) -> bool {
        self.handle_of.contains_key(o)
    }

    pub(crate) fn handle(&self, o: &O) -> Option<NodeT> {
        self.handle_of.get(o).copied()
    }

    /// Add `o` as a node if absent; idempotent. Returns its handle.
    pub fn add_node(&mut self, o: O) -> NodeT {
        if let Some(&h) = self.handle_of.get(&o) {
            return h;
        }
        let h = self.next_handle;
        self.next_handle += 1;
        self.handle_of.insert(o.clone(), h);
        self.objects.insert(h, o);
        self.out_adj.insert(h, HashMap::new());
        self.in_adj.insert(h, HashMap::new());
        h
    }

    /// Remove `o` and every edge incident to it, in both directions, plus
    /// its node-data entries. No-op if `o` is not a node.
    pub fn delete_node(&mut self, o: &O) {
        let Some(h) = self.handle_of.remove(o) else {
            return;
        };
        self.objects.remove(&h);
        self.node_data.remove(&h);

        if let Some(succs) = self.out_adj.remove(&h) {
            for (other, _) in succs {
                if let Some(preds) = self.in_adj.get_mut(&other) {
                    preds.remove(&h);
                }
            }
        }
        if let Some(preds) = self.in_adj.remove(&h) {
            for (other, _) in preds {
                if let Some(succs) = self.out_adj.get_mut(&other) {
                    succs.remove(&h);
                }
            }
        }
    }

    /// Union `label` into the edge `(src, dst)`, creating both endpoints
    /// and the edge if absent. Self-loops are permitted (never introduced
    /// by the engine itself, per spec.md §3).
    pub fn add_edge(&mut self, src: O, dst: O, label: EdgeBitmap) {
        let s = self.add_node(src);
        let d = self.add_node(dst);
        self.out_adj
            .get_mut(&s)
            .unwrap()
            .entry(d)
            .and_modify(|b| b.union_in_place(&label))
            .or_insert(label);
        self.in_adj
            .get_mut(&d)
            .unwrap()
            .entry(s)
            .and_modify(|b| b.union_in_place(&label))
            .or_insert(label);
    }

    /// `true` if there is an edge `(src, dst)`.
    pub fn has_edge(&self, src: &O, dst: &O) -> bool {
        match (self.handle(src), self.handle(dst)) {
            (Some(s), Some(d)) => self.out_adj.get(&s).map_or(false, |m| m.contains_key(&d)),
            _ => false,
        }
    }

    pub fn set_node_data(&mut self, o: &O, key: &str, value: NodeDataValue) {
        if let Some(h) = self.handle(o) {
            self.node_data.entry(h).or_default().insert(key.to_string(), value);
        }
    }

    pub fn node_data(&self, o: &O, key: &str) -> Option<NodeDataValue> {
        let h = self.handle(o)?;
        self.node_data.get(&h)?.get(key).copied()
    }

    pub(crate) fn out_degree(&self, h: NodeT) -> usize {
        self.out_adj.get(&h).map_or(0, |m| m.len())
    }

    pub(crate) fn in_degree(&self, h: NodeT) -> usize {
        self.in_adj.get(&h).map_or(0, |m| m.len())
    }

    pub(crate) fn object_of(&self, h: NodeT) -> &O {
        &self.objects[&h]
    }
}
