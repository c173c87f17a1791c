//! The types in which solve outcomes are reported.

mod multiplicity;
mod solve_result;

pub use multiplicity::Multiplicity;
pub use multiplicity::SolutionCount;
pub use solve_result::Diagnostics;
pub use solve_result::SolveResult;
