/// The conclusion of a single search run.
///
/// Unsatisfiability and running out of budget are ordinary outcomes, which is why they are
/// statuses here rather than errors; see [`BackendError`](crate::backend::BackendError) for the
/// failures which are fatal to a solve call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// A model satisfying all constraints was found.
    Satisfiable,
    /// No model satisfies the constraints.
    Unsatisfiable,
    /// The termination condition fired before the search reached a conclusion.
    Timeout,
}
