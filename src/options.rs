//! Configuration of the solving process.

use std::num::NonZero;

/// Options for a [`Solver`](crate::api::Solver) run.
///
/// The literal budget of a backend is not part of these options; it is a construction
/// parameter of the backend itself.
#[derive(Debug, Clone, Copy)]
pub struct SolverOptions {
    /// The number of solutions after which the search for further solutions is cut off.
    ///
    /// The first solution is always reported in full; the limit only bounds how far the
    /// multiplicity probe counts. Limits below two disable the probe.
    pub solution_limit: u64,

    /// An optional cap on the number of steps any single user may perform.
    ///
    /// `None` leaves workloads unbounded.
    pub max_steps_per_user: Option<NonZero<u32>>,
}

impl Default for SolverOptions {
    fn default() -> SolverOptions {
        SolverOptions {
            solution_limit: 1000,
            max_steps_per_user: None,
        }
    }
}
