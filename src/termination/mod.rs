//! Conditions under which the backends give up on a solve call.
//!
//! Every solve entry point takes a [`TerminationCondition`]. The backends poll it at each
//! search step and report conflicts to it, so budgets on wall time and on conflicts can be
//! expressed uniformly. Conditions compose with [`Combinator`].

mod budget;
mod combinator;
mod indefinite;
mod signal;

pub use budget::ConflictBudget;
pub use budget::TimeBudget;
pub use combinator::Combinator;
pub use indefinite::Indefinite;
pub use signal::SignalFlag;

/// A condition which determines when a backend should stop searching.
pub trait TerminationCondition {
    /// Returns true when the search has to give up.
    fn should_stop(&mut self) -> bool;

    /// Notifies the condition that the search encountered a conflict.
    fn encountered_conflict(&mut self) {}
}
