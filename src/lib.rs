//! A bounded, probability-weighted reachability engine over a directory-
//! service object graph (principals, groups, computers, organizational
//! units, and the typed control edges between them).
//!
//! Given a set of target objects, [`analysis::analyze`] performs a
//! multi-round breadth-first expansion, honoring per-round node/edge
//! policy, a per-edge and accumulated-path probability threshold, and a
//! degree cap with group-priority, and then prunes the resulting working
//! graph to a fixpoint, a node budget, and island-free form.
//!
//! The crate is intentionally agnostic to where the object graph and its
//! typed edges come from: callers implement [`object::ObjectAdapter`] and
//! [`object::ObjectStore`] over their own backing store (an LDAP cache, a
//! loaded snapshot, an in-memory fixture, ...) and register their edge
//! kinds' probability functions with an [`registry::EdgeRegistry`].

pub mod analysis;
pub mod bitmaps;
pub mod direction;
pub mod filter;
pub mod graph;
mod graph_impl;
pub mod object;
pub mod progress;
pub mod registry;
pub mod sid;
pub mod state;
pub mod types;

pub use analysis::{analyze, AnalysisConfig, AnalysisOptions, AnalysisResults};
pub use bitmaps::EdgeBitmap;
pub use direction::Direction;
pub use filter::NodeFilter;
pub use graph::{NodeDataValue, WorkingGraph};
pub use object::{ObjectAdapter, ObjectStore};
pub use progress::{ProgressEvent, ProgressFn, ProgressObserver};
pub use registry::{EdgeKind, EdgeRegistry};
pub use sid::Sid;
pub use types::{NodeT, Probability, Result, RoundT};
