//! Per-call search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Why the iteration loop ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The full playout budget ran.
    #[default]
    Budget,
    /// `time_limit_ms` elapsed first.
    Deadline,
    /// The tree reached `max_nodes`.
    NodeLimit,
    /// The root was already terminal; nothing ran.
    TerminalRoot,
}

/// Statistics collected during one `search` call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Iterations completed (warm-up excluded).
    pub iterations: u32,

    /// Children added to the tree, warm-up included.
    pub nodes_expanded: u32,

    /// Random playouts run.
    pub simulations: u32,

    /// Deepest node created.
    pub max_depth: u16,

    /// Wall-clock time of the call (microseconds).
    pub time_us: u64,

    /// How the loop ended.
    pub stop_reason: StopReason,
}

impl SearchStats {
    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Iterations per second of wall-clock time.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Whether the loop stopped before spending its whole budget.
    #[must_use]
    pub fn stopped_early(&self) -> bool {
        matches!(self.stop_reason, StopReason::Deadline | StopReason::NodeLimit)
    }
}
