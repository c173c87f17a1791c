//! Classification of how many solutions an instance admits.

use std::fmt;

/// Whether solutions beyond the reported witness exist.
///
/// The driver establishes this by enumerating further models, counting exactly up to its
/// solution limit. Rendering a [`Multiplicity`] with [`fmt::Display`] produces the note shown
/// underneath a satisfiable report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Multiplicity {
    /// The witness is the only solution.
    Unique,
    /// More than one solution exists.
    Multiple(SolutionCount),
    /// The probe was cut off before a second solution was confirmed or refuted.
    Undetermined,
    /// There is no witness, so multiplicity does not apply.
    NotApplicable,
}

/// The solution count backing a [`Multiplicity::Multiple`] classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolutionCount {
    /// The enumeration finished; this is the total number of solutions.
    Exact(u64),
    /// The enumeration was cut off by the solution limit or the termination condition; at
    /// least this many solutions exist.
    AtLeast(u64),
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Multiplicity::Unique => write!(f, "this is the only solution"),
            Multiplicity::Multiple(SolutionCount::Exact(count)) => {
                write!(f, "other solutions exist, {count} solutions found")
            }
            Multiplicity::Multiple(SolutionCount::AtLeast(count)) => {
                write!(f, "other solutions exist, at least {count} solutions found")
            }
            Multiplicity::Undetermined => {
                write!(f, "unable to determine whether other solutions exist")
            }
            Multiplicity::NotApplicable => write!(f, "not applicable"),
        }
    }
}
