//! Policies deciding when a failed search attempt should be retried from
//! the root, typically paired with a randomized variable heuristic.

use crate::solver::stats::SearchStats;

/// Decides whether attempt `attempt + 1` should be made after an attempt
/// ended without a solution.
pub trait RestartPolicy {
    fn should_restart(&self, attempt: u32, stats: &SearchStats) -> bool;
}

/// Never restarts: a completed search is final.
pub struct NoRestartPolicy;

impl RestartPolicy for NoRestartPolicy {
    fn should_restart(&self, _attempt: u32, _stats: &SearchStats) -> bool {
        false
    }
}

/// Restarts while the last attempt hit the backtrack limit, up to a bounded
/// number of attempts.
pub struct BacktrackLimitRestart {
    pub max_backtracks: u64,
    pub max_attempts: u32,
}

impl RestartPolicy for BacktrackLimitRestart {
    fn should_restart(&self, attempt: u32, stats: &SearchStats) -> bool {
        attempt < self.max_attempts && stats.backtracks >= self.max_backtracks
    }
}
