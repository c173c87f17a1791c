use std::time::Duration;
use std::time::Instant;

use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers when the given wall-time budget has elapsed.
#[derive(Clone, Copy, Debug)]
pub struct TimeBudget {
    started_at: Instant,
    budget: Duration,
}

impl TimeBudget {
    /// Give the solver a time budget, starting now.
    pub fn starting_now(budget: Duration) -> TimeBudget {
        TimeBudget {
            started_at: Instant::now(),
            budget,
        }
    }
}

impl TerminationCondition for TimeBudget {
    fn should_stop(&mut self) -> bool {
        self.started_at.elapsed() >= self.budget
    }
}

/// A [`TerminationCondition`] which triggers when the specified conflict budget has been
/// exceeded.
#[derive(Clone, Copy, Debug)]
pub struct ConflictBudget {
    budget: usize,
    encountered: usize,
}

impl ConflictBudget {
    /// Give the solver a conflict budget.
    pub fn with_budget(budget: usize) -> ConflictBudget {
        ConflictBudget {
            budget,
            encountered: 0,
        }
    }
}

impl TerminationCondition for ConflictBudget {
    fn should_stop(&mut self) -> bool {
        self.encountered >= self.budget
    }

    fn encountered_conflict(&mut self) {
        self.encountered += 1
    }
}
