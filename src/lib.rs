//! # Warrant
//! Warrant is a solver for the workflow satisfiability problem (WSP): given a workflow of
//! steps and a pool of users, assign exactly one user to every step such that all
//! authorisation rules and inter-step constraints hold.
//!
//! The supported constraint families are:
//! * *Authorisations*: a declared user may only perform the listed steps. Users without a
//!   declared list are unrestricted.
//! * *Separation-of-duty*: two steps must be performed by different users.
//! * *Binding-of-duty*: two steps must be performed by the same user.
//! * *At-most-k*: at most `k` distinct users perform the given steps.
//! * *One-team*: the given steps are performed by members of exactly one of the listed
//!   teams.
//!
//! Instances are encoded into propositional constraints over a steps-by-users grid of
//! decision variables and handed to one of two interchangeable backends: an enumerating
//! depth-first search which suspends at every model, or a clause-based search which probes
//! for further models through blocking clauses. Besides deciding satisfiability, the solver
//! reports whether the witness is the only solution, counting solutions up to a
//! configurable limit.
//!
//! # Solving an instance
//! ```
//! use warrant::backend::EnumerationBackend;
//! use warrant::parsing::parse_instance;
//! use warrant::termination::Indefinite;
//! use warrant::Multiplicity;
//! use warrant::SolveStatus;
//! use warrant::Solver;
//!
//! let instance = parse_instance(
//!     "#Steps: 2\n\
//!      #Users: 2\n\
//!      #Constraints: 1\n\
//!      Separation-of-duty s1 s2\n",
//! )?;
//!
//! let solver: Solver<EnumerationBackend> = Solver::default();
//! let result = solver.satisfy(&instance, &mut Indefinite)?;
//!
//! assert_eq!(result.status(), SolveStatus::Satisfiable);
//! // Two users over two steps with a separation: both orders work.
//! assert_ne!(result.multiplicity(), Multiplicity::Unique);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Solves are bounded through [`termination::TerminationCondition`] values such as
//! [`termination::TimeBudget`]; hitting the budget surfaces as [`SolveStatus::Timeout`],
//! never as unsatisfiability.
//!
//! ## Feature Flags
//! - `debug-checks`: Enable expensive internal consistency assertions. Turned off by
//!   default.

pub mod api;
pub(crate) mod asserts;
pub mod backend;
pub(crate) mod basic_types;
pub(crate) mod encoding;
pub mod generation;
pub mod model;
pub mod options;
pub mod parsing;
pub mod runner;
pub mod statistics;
pub mod termination;

#[cfg(test)]
pub(crate) mod tests;

pub use api::outputs::Diagnostics;
pub use api::outputs::Multiplicity;
pub use api::outputs::SolutionCount;
pub use api::outputs::SolveResult;
pub use api::Solver;
pub use basic_types::Assignment;
pub use basic_types::SolveStatus;
pub use options::SolverOptions;
