//! Iteration and enumeration methods on [`WorkingGraph`], split into its
//! own file the way the teacher crate splits a core struct (`graph.rs`)
//! from its heavier `impl` surface (`graph_impl.rs`).

use crate::bitmaps::EdgeBitmap;
use crate::direction::Direction;
use crate::graph::WorkingGraph;
use crate::object::ObjectAdapter;

impl<O: ObjectAdapter> WorkingGraph<O> {
    /// Incident edges of `o` in the given direction, as
    /// `(other_endpoint, label)` pairs. Iteration order need not be
    /// stable, but must be exhaustive (spec.md §4.2).
    pub fn edges(&self, o: &O, dir: Direction) -> Vec<(O, EdgeBitmap)> {
        let Some(h) = self.handle(o) else {
            return Vec::new();
        };
        let adj = match dir {
            Direction::Out => &self.out_adj,
            Direction::In => &self.in_adj,
        };
        adj.get(&h)
            .map(|m| {
                m.iter()
                    .map(|(&other, &bm)| (self.object_of(other).clone(), bm))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Snapshot of every node currently in the graph.
    pub fn iterate_nodes(&self) -> Vec<O> {
        self.objects.values().cloned().collect()
    }

    /// Snapshot of every edge currently in the graph, as `(src, dst, label)`.
    pub fn iterate_edges(&self) -> Vec<(O, O, EdgeBitmap)> {
        let mut out = Vec::with_capacity(self.size());
        for (&s, succs) in &self.out_adj {
            for (&d, &bm) in succs {
                out.push((self.object_of(s).clone(), self.object_of(d).clone(), bm));
            }
        }
        out
    }

    /// Nodes with in-degree 0.
    pub fn starting_nodes(&self) -> Vec<O> {
        self.objects
            .keys()
            .filter(|&&h| self.in_degree(h) == 0)
            .map(|&h| self.object_of(h).clone())
            .collect()
    }

    /// Nodes with out-degree 0.
    pub fn ending_nodes(&self) -> Vec<O> {
        self.objects
            .keys()
            .filter(|&&h| self.out_degree(h) == 0)
            .map(|&h| self.object_of(h).clone())
            .collect()
    }

    /// Nodes with total degree 0.
    pub fn islands(&self) -> Vec<O> {
        self.objects
            .keys()
            .filter(|&&h| self.in_degree(h) == 0 && self.out_degree(h) == 0)
            .map(|&h| self.object_of(h).clone())
            .collect()
    }

    /// The outer set for the given exploration direction: `starting_nodes`
    /// for `In`, `ending_nodes` for `Out` (spec.md §4.3 step 4 and glossary
    /// "Outer node").
    pub fn outer_nodes(&self, dir: Direction) -> Vec<O> {
        match dir {
            Direction::In => self.starting_nodes(),
            Direction::Out => self.ending_nodes(),
        }
    }
}
