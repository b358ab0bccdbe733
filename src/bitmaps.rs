//! Typed-edge bitmap (spec.md §4.1).
//!
//! A fixed-width bitset over registered [`EdgeKind`]s, generous enough for
//! any realistic directory-service edge-type registry (the teacher crate's
//! own note on its analogous node-id bitmap applies here too: size the
//! bitmap dynamically or fix a generous upper bound — this crate takes the
//! upper-bound route, matching `EdgeRegistry::CAPACITY`).

use bitvec::prelude::*;

use crate::object::ObjectAdapter;
use crate::registry::{EdgeKind, EdgeRegistry};
use crate::types::Probability;

/// Upper bound on the number of distinct registered edge kinds.
pub const CAPACITY: usize = 128;

type Bits = BitArray<[u64; 2]>;

/// A set of [`EdgeKind`]s, e.g. the union of all edge kinds permitted
/// between one ordered pair of nodes.
#[derive(Clone, Copy, Default, Eq, PartialEq)]
pub struct EdgeBitmap {
    bits: Bits,
}

impl core::fmt::Debug for EdgeBitmap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EdgeBitmap")
            .field("kinds", &self.iter().map(|k| k.index()).collect::<Vec<_>>())
            .finish()
    }
}

impl EdgeBitmap {
    /// The empty bitmap.
    pub fn blank() -> Self {
        Self::default()
    }

    /// A bitmap with a single kind set.
    pub fn single(kind: EdgeKind) -> Self {
        let mut b = Self::blank();
        b.set(kind);
        b
    }

    /// Set `kind` in this bitmap (in place).
    pub fn set(&mut self, kind: EdgeKind) {
        self.bits.set(kind.index(), true);
    }

    /// `true` if `kind` is set.
    pub fn is_set(&self, kind: EdgeKind) -> bool {
        self.bits[kind.index()]
    }

    /// `true` if no kind is set.
    pub fn is_blank(&self) -> bool {
        self.bits.not_any()
    }

    /// Number of kinds set.
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Bitwise intersection.
    pub fn intersect(&self, other: &EdgeBitmap) -> EdgeBitmap {
        EdgeBitmap {
            bits: self.bits & other.bits,
        }
    }

    /// Bitwise union.
    pub fn union(&self, other: &EdgeBitmap) -> EdgeBitmap {
        EdgeBitmap {
            bits: self.bits | other.bits,
        }
    }

    /// Union `other` into `self` in place (used by `WorkingGraph::add_edge`,
    /// which "unions b into the existing label").
    pub fn union_in_place(&mut self, other: &EdgeBitmap) {
        self.bits |= other.bits;
    }

    /// Iterate the set kinds, in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = EdgeKind> + '_ {
        self.bits.iter_ones().map(EdgeKind::from_index)
    }

    /// The largest probability any set kind confers on the ordered pair
    /// `(src, dst)`, per the registered probability functions. A kind whose
    /// registered probability is 0 for this pair contributes nothing: a
    /// bitmap that is non-blank but whose `max_probability` is 0 (e.g. a
    /// pure-deny ACL) is "no usable edge" for the expansion engine.
    pub fn max_probability<O: ObjectAdapter>(
        &self,
        registry: &EdgeRegistry<O>,
        src: &O,
        dst: &O,
    ) -> Probability {
        self.iter()
            .map(|kind| registry.probability(kind, src, dst))
            .max()
            .unwrap_or(0)
    }
}
