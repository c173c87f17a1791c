use log::debug;

use super::outputs::Multiplicity;
use super::outputs::SolutionCount;
use super::outputs::SolveResult;
use crate::backend::Backend;
use crate::backend::BackendError;
use crate::basic_types::Assignment;
use crate::basic_types::SolveStatus;
use crate::encoding;
use crate::encoding::AssignmentGrid;
use crate::model::Instance;
use crate::options::SolverOptions;
use crate::statistics::log_statistic_postfix;
use crate::statistics::should_log_statistics;
use crate::termination::TerminationCondition;

/// The driver tying an [`Instance`], the encoders, and a [`Backend`] together.
///
/// A solver is single-use: [`Solver::satisfy`] consumes it, encodes the instance into the
/// backend, searches, and classifies the outcome. On a satisfiable instance the driver also
/// probes how many solutions exist, counting exactly up to
/// [`SolverOptions::solution_limit`].
///
/// # Example
/// ```
/// # use warrant::backend::EnumerationBackend;
/// # use warrant::model::Instance;
/// # use warrant::termination::Indefinite;
/// # use warrant::Solver;
/// # use warrant::SolveStatus;
/// let instance = Instance::new(2, 2);
/// let solver: Solver<EnumerationBackend> = Solver::default();
///
/// let result = solver.satisfy(&instance, &mut Indefinite)?;
/// assert_eq!(result.status(), SolveStatus::Satisfiable);
/// assert_eq!(result.assignment().len(), 2);
/// # Ok::<(), warrant::backend::BackendError>(())
/// ```
#[derive(Debug, Default)]
pub struct Solver<B> {
    backend: B,
    options: SolverOptions,
}

impl<B: Backend> Solver<B> {
    /// Creates a solver around the given backend with the provided [`SolverOptions`].
    pub fn with_options(backend: B, options: SolverOptions) -> Solver<B> {
        Solver { backend, options }
    }

    /// Encodes and solves the instance.
    ///
    /// Unsatisfiability and hitting the termination condition are reported through
    /// [`SolveResult::status`]; an `Err` is reserved for backend failures.
    pub fn satisfy(
        self,
        instance: &Instance,
        termination: &mut impl TerminationCondition,
    ) -> Result<SolveResult, BackendError> {
        self.satisfy_with_callback(instance, termination, |_| {})
    }

    /// Like [`Solver::satisfy`], additionally invoking `on_solution` for the witness and for
    /// every further solution found while probing the multiplicity.
    pub fn satisfy_with_callback(
        mut self,
        instance: &Instance,
        termination: &mut impl TerminationCondition,
        mut on_solution: impl FnMut(&Assignment),
    ) -> Result<SolveResult, BackendError> {
        let grid = encoding::encode(instance, self.options.max_steps_per_user, &mut self.backend);
        let result = match self.backend.solve(termination)? {
            SolveStatus::Unsatisfiable => SolveResult::unsatisfiable(),
            SolveStatus::Timeout => SolveResult::timeout(),
            SolveStatus::Satisfiable => {
                let witness = grid.extract_assignment(&self.backend);
                on_solution(&witness);
                let multiplicity =
                    self.probe_multiplicity(&grid, termination, &mut on_solution)?;
                SolveResult::satisfiable(witness, multiplicity)
            }
        };
        debug!(
            "backend {} reported {:?} with multiplicity {:?}",
            self.backend.name(),
            result.status(),
            result.multiplicity()
        );
        if should_log_statistics() {
            self.backend.log_statistics();
            log_statistic_postfix();
        }
        Ok(result)
    }

    /// Counts models beyond the witness, up to the solution limit.
    fn probe_multiplicity(
        &mut self,
        grid: &AssignmentGrid,
        termination: &mut impl TerminationCondition,
        on_solution: &mut impl FnMut(&Assignment),
    ) -> Result<Multiplicity, BackendError> {
        let limit = self.options.solution_limit;
        let mut found: u64 = 1;
        loop {
            if found >= limit {
                debug!("stopping the search after {found} solutions");
                return Ok(if found == 1 {
                    Multiplicity::Undetermined
                } else {
                    Multiplicity::Multiple(SolutionCount::AtLeast(found))
                });
            }
            match self.backend.solve_next(grid.variables(), termination)? {
                SolveStatus::Unsatisfiable => {
                    return Ok(if found == 1 {
                        Multiplicity::Unique
                    } else {
                        Multiplicity::Multiple(SolutionCount::Exact(found))
                    });
                }
                SolveStatus::Timeout => {
                    return Ok(if found == 1 {
                        Multiplicity::Undetermined
                    } else {
                        Multiplicity::Multiple(SolutionCount::AtLeast(found))
                    });
                }
                SolveStatus::Satisfiable => {
                    found += 1;
                    on_solution(&grid.extract_assignment(&self.backend));
                }
            }
        }
    }
}
