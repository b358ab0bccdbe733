//! Edge-kind registry (spec.md §6 static adapter surface).
//!
//! `EdgeKind`s are registered once at process start, the way the teacher
//! crate interns node/edge type names into a `Vocabulary` once at graph
//! construction (`constructors.rs`). Here the "vocabulary" is the universe
//! of typed control edges (membership, ACL grant, delegation, ...), each
//! carrying a probability callback supplied by the caller.

use hashbrown::HashMap;

use crate::bitmaps::{EdgeBitmap, CAPACITY};
use crate::object::ObjectAdapter;
use crate::types::{Probability, Result};

/// A registered edge kind. Cheap, `Copy` index into the owning
/// [`EdgeRegistry`]'s tables.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct EdgeKind(u16);

impl EdgeKind {
    pub(crate) fn from_index(index: usize) -> Self {
        EdgeKind(index as u16)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

type ProbabilityFn<O> = Box<dyn Fn(&O, &O) -> Probability + Send + Sync>;

/// The edge-type registry: names, probability callbacks, and the
/// distinguished `MemberOfGroup` kind the degree-cap policy privileges.
pub struct EdgeRegistry<O: ObjectAdapter> {
    names: Vec<String>,
    by_name: HashMap<String, EdgeKind>,
    probability_fns: Vec<ProbabilityFn<O>>,
    member_of_group: Option<EdgeKind>,
}

impl<O: ObjectAdapter> Default for EdgeRegistry<O> {
    fn default() -> Self {
        EdgeRegistry {
            names: Vec::new(),
            by_name: HashMap::new(),
            probability_fns: Vec::new(),
            member_of_group: None,
        }
    }
}

impl<O: ObjectAdapter> EdgeRegistry<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new edge kind with its probability callback.
    ///
    /// # Raises
    /// * If `name` is already registered.
    /// * If the registry's fixed-width bitmap capacity (`CAPACITY`) is
    ///   exhausted.
    pub fn register(
        &mut self,
        name: &str,
        probability_fn: impl Fn(&O, &O) -> Probability + Send + Sync + 'static,
    ) -> Result<EdgeKind> {
        if self.by_name.contains_key(name) {
            return Err(format!("edge kind '{}' is already registered", name));
        }
        if self.names.len() >= CAPACITY {
            return Err(format!(
                "edge-kind registry capacity ({}) exhausted registering '{}'",
                CAPACITY, name
            ));
        }
        let kind = EdgeKind::from_index(self.names.len());
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), kind);
        self.probability_fns.push(Box::new(probability_fn));
        Ok(kind)
    }

    /// Mark an already-registered kind as the distinguished `MemberOfGroup`
    /// kind the degree-cap policy commits first (spec.md §4.3, §9 — "Get
    /// rid of this" in upstream source, behavior preserved as-is).
    pub fn mark_member_of_group(&mut self, kind: EdgeKind) {
        self.member_of_group = Some(kind);
    }

    pub fn member_of_group(&self) -> Option<EdgeKind> {
        self.member_of_group
    }

    pub fn name(&self, kind: EdgeKind) -> &str {
        &self.names[kind.index()]
    }

    pub fn lookup(&self, name: &str) -> Option<EdgeKind> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `p_k(src, dst)` for the registered kind `k`.
    pub fn probability(&self, kind: EdgeKind, src: &O, dst: &O) -> Probability {
        (self.probability_fns[kind.index()])(src, dst)
    }

    /// The bitmap with every registered kind set.
    pub fn universe(&self) -> EdgeBitmap {
        let mut bitmap = EdgeBitmap::blank();
        for i in 0..self.names.len() {
            bitmap.set(EdgeKind::from_index(i));
        }
        bitmap
    }
}
