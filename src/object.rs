//! External object/edge adapter (spec.md §6, "consumed").
//!
//! The engine never owns or mutates the object population; it only reads
//! through these traits. Implementors (the out-of-scope object store) must
//! present a *total* read interface — spec.md §7: "Adapter failures ... are
//! not part of the core contract; adapters must present a total read
//! interface."

use crate::bitmaps::EdgeBitmap;
use crate::direction::Direction;
use crate::sid::Sid;

/// A read-only handle onto one externally-owned directory object.
///
/// `Eq + Hash + Clone` is required because the working graph and the
/// per-node state table key on object identity; implementors typically
/// wrap a cheap opaque id (an arena index, a row id, ...).
pub trait ObjectAdapter: Eq + std::hash::Hash + Clone {
    /// The node-type tag used by `ObjectTypesFirst/Middle/Last` filters.
    type TypeTag: Eq + Clone + std::hash::Hash;

    /// This object's type tag.
    fn object_type(&self) -> Self::TypeTag;

    /// This object's security identifier, if any.
    fn sid(&self) -> Option<Sid>;

    /// Integer attribute lookup by key, e.g. for `SortBy`.
    fn attr_int(&self, key: &str) -> Option<i64>;
}

/// Directional edge iteration plus population enumeration for one backing
/// object store.
///
/// Both directions must be retrievable per spec.md §6 ("Edges(o, Dir) ...
/// both directions must be retrievable"), since the engine's BFS direction
/// is a per-call option, not a per-store fact.
pub trait ObjectStore<O: ObjectAdapter> {
    /// All objects in the population, for `FilterFirst` seeding.
    fn objects(&self) -> Box<dyn Iterator<Item = O> + '_>;

    /// Edges incident to `o` in the requested direction, as
    /// `(other_endpoint, permitted_kinds)` pairs.
    fn edges(&self, o: &O, dir: Direction) -> Box<dyn Iterator<Item = (O, EdgeBitmap)> + '_>;
}
