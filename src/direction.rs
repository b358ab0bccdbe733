//! Exploration direction (spec.md §3).

/// Which way the expansion engine walks the graph.
///
/// A single [`crate::analysis::AnalysisOptions::direction`] applies for the
/// whole analysis call.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Explore predecessors of the targets: "who can reach this".
    In,
    /// Explore successors of the targets: "what does this reach".
    Out,
}

impl Direction {
    /// The opposite direction, used when reasoning about direction duality
    /// (spec.md §8 law: `Out` on `G` is equivalent to `In` on `G` reversed).
    pub fn reversed(self) -> Direction {
        match self {
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::In
    }
}
