//! Progress side-channel (spec.md §5/§9): "the core emits begin/advance/end
//! events"; cancellation, if a caller needs it, is interposed by breaking
//! out on the next event rather than via any cancellation token in the core
//! contract itself.
//!
//! Modeled as an injected-observer trait, the same shape as [`crate::filter::NodeFilter`]
//! and its `FilterFn` closure adapter, rather than pulling in a rendering
//! crate (`indicatif`, as the teacher uses for its own CLI-facing progress
//! bars) — this is a side-channel capability for an embedding caller, not a
//! terminal UI concern, so the engine stays agnostic to how (or whether) the
//! events are displayed.

use crate::types::RoundT;

/// One point in an analysis call's lifecycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProgressEvent {
    /// Emitted once, before round-1 seeding.
    Begin,
    /// Emitted once per completed expansion round (spec.md §4.3 step 2).
    Advance {
        round: RoundT,
        order: usize,
        size: usize,
    },
    /// Emitted once, after the post-filter pipeline (spec.md §4.4) finishes.
    End {
        order: usize,
        size: usize,
        removed: usize,
    },
}

/// Receives [`ProgressEvent`]s from [`crate::analysis::analyze`].
///
/// There is no cancellation token in the core contract (spec.md §5): a
/// caller that wants to cancel a long-running analysis does so by breaking
/// out of its own control flow (e.g. unwinding, or tearing down the
/// eventually-returned graph) the next time one of these methods is called,
/// not by a return value this trait defines.
pub trait ProgressObserver {
    fn on_event(&mut self, event: ProgressEvent);
}

/// Wrap a plain `FnMut(ProgressEvent)` closure as a [`ProgressObserver`].
pub struct ProgressFn<F>(pub F);

impl<F> ProgressObserver for ProgressFn<F>
where
    F: FnMut(ProgressEvent),
{
    fn on_event(&mut self, event: ProgressEvent) {
        (self.0)(event)
    }
}
