//! Shared numeric type aliases used throughout the crate.
//!
//! Mirrors the teacher crate's convention of naming index types for the
//! quantity they count (`NodeT`, `EdgeT`, ...) rather than using bare
//! `usize`/`u32` at every call site.

/// Opaque handle identifying a node in a [`crate::graph::WorkingGraph`].
///
/// Backed by an arena index rather than a pointer: the spec's object
/// identity is "by external pointer/handle", and an index into a dense
/// arena is the stable-handle equivalent a safe Rust implementation uses.
pub type NodeT = u32;

/// A round number in the expansion BFS. Round 1 is the seed round.
pub type RoundT = u32;

/// Integer confidence/feasibility value in `0..=100`, as produced by a
/// registered edge kind's probability function.
pub type Probability = u8;

/// Result alias matching the teacher crate's `Result<T, String>` idiom.
pub type Result<T> = core::result::Result<T, String>;
