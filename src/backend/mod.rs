//! The seam between the constraint encoders and a concrete search procedure.
//!
//! [`Backend`] is the capability interface a solver has to offer: fresh boolean variables,
//! clauses, unit-coefficient linear inequalities, implications, equivalences, and a
//! solve/solve-next protocol. Two implementations with deliberately different search
//! structures are bundled:
//!
//! * [`EnumerationBackend`] walks one chronological search tree and suspends at every model,
//!   so enumerating solutions resumes the same walk;
//! * [`IncrementalBackend`] lowers everything to clauses plus counted linear rows and finds
//!   further models by adding a blocking clause and solving again.
//!
//! Both report over the shared [`SolveStatus`] flag and are interchangeable from the driver's
//! point of view.

mod enumeration;
mod incremental;

use std::fmt;
use std::ops::Not;

use thiserror::Error;

pub use enumeration::EnumerationBackend;
pub use incremental::IncrementalBackend;

use crate::basic_types::SolveStatus;
use crate::termination::TerminationCondition;

/// The default number of literals a backend accepts before reporting
/// [`BackendError::CapacityExceeded`].
pub(crate) const DEFAULT_LITERAL_BUDGET: usize = 1 << 24;

/// A propositional variable handed out by [`Backend::new_variable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Variable(u32);

impl Variable {
    pub(crate) fn new(index: u32) -> Variable {
        Variable(index)
    }

    /// The creation index of the variable.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A [`Variable`] together with a polarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Literal {
    variable: Variable,
    is_positive: bool,
}

impl Literal {
    pub fn new(variable: Variable, is_positive: bool) -> Literal {
        Literal {
            variable,
            is_positive,
        }
    }

    pub fn variable(self) -> Variable {
        self.variable
    }

    pub fn is_positive(self) -> bool {
        self.is_positive
    }

    /// The truth value of this literal when its variable takes `variable_value`.
    pub(crate) fn value_given(self, variable_value: bool) -> bool {
        variable_value == self.is_positive
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal::new(self.variable, !self.is_positive)
    }
}

/// Failures which are fatal to a solve call. Unsatisfiability and timeouts are not failures;
/// they are [`SolveStatus`] values.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BackendError {
    /// The model grew past the backend's literal budget.
    #[error("the model exceeds the backend capacity of {limit} literals")]
    CapacityExceeded { limit: usize },
}

/// Selects one of the bundled backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    #[default]
    Enumeration,
    Incremental,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Enumeration => write!(f, "enumeration"),
            BackendKind::Incremental => write!(f, "incremental"),
        }
    }
}

/// The capability interface required from a concrete solver.
///
/// Adding constraints is infallible. A model which becomes trivially unsatisfiable, for
/// instance through an empty clause, is latched and reported as
/// [`SolveStatus::Unsatisfiable`] by the next solve call. Growing the model past the
/// backend's literal budget is latched as well and reported as
/// [`BackendError::CapacityExceeded`].
pub trait Backend {
    /// A short name identifying the backend in logs and statistics.
    fn name(&self) -> &'static str;

    /// Creates a fresh propositional variable. The name is only used for tracing.
    fn new_variable(&mut self, name: &str) -> Variable;

    /// Adds the disjunction of the given literals.
    fn add_clause(&mut self, literals: &[Literal]);

    /// Requires that at most `bound` of the given literals are true.
    fn add_linear_le(&mut self, literals: &[Literal], bound: usize);

    /// Requires `consequent` to hold whenever `condition` holds.
    fn add_implication(&mut self, condition: Literal, consequent: Literal);

    /// Requires `first` and `second` to take the same truth value.
    fn add_equivalence(&mut self, first: Literal, second: Literal);

    /// Searches for a model of the constraints added so far.
    fn solve(
        &mut self,
        termination: &mut dyn TerminationCondition,
    ) -> Result<SolveStatus, BackendError>;

    /// Searches for a model whose restriction to `project_onto` differs from the restriction
    /// of every model this backend reported before. Reports
    /// [`SolveStatus::Unsatisfiable`] when no such model remains.
    ///
    /// Callers must pass the same `project_onto` variables on every call for the
    /// deduplication to be meaningful.
    fn solve_next(
        &mut self,
        project_onto: &[Variable],
        termination: &mut dyn TerminationCondition,
    ) -> Result<SolveStatus, BackendError>;

    /// The value of `variable` in the most recently found model.
    fn value(&self, variable: Variable) -> bool;

    /// Logs the backend's search counters through [`crate::statistics`].
    fn log_statistics(&self);
}
