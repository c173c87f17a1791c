//! The complete outcome of one solve call.

use std::time::Duration;

use super::Multiplicity;
use crate::basic_types::Assignment;
use crate::basic_types::SolveStatus;

/// Everything one solve call produces: the status, a witness assignment when one exists, the
/// solution multiplicity, and the diagnostics filled in by the process layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveResult {
    status: SolveStatus,
    assignment: Assignment,
    multiplicity: Multiplicity,
    diagnostics: Diagnostics,
}

impl SolveResult {
    pub(crate) fn satisfiable(assignment: Assignment, multiplicity: Multiplicity) -> SolveResult {
        SolveResult {
            status: SolveStatus::Satisfiable,
            assignment,
            multiplicity,
            diagnostics: Diagnostics::default(),
        }
    }

    pub(crate) fn unsatisfiable() -> SolveResult {
        SolveResult {
            status: SolveStatus::Unsatisfiable,
            assignment: Assignment::default(),
            multiplicity: Multiplicity::NotApplicable,
            diagnostics: Diagnostics::default(),
        }
    }

    pub(crate) fn timeout() -> SolveResult {
        SolveResult {
            status: SolveStatus::Timeout,
            assignment: Assignment::default(),
            multiplicity: Multiplicity::NotApplicable,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// The witness assignment. Empty unless the status is [`SolveStatus::Satisfiable`].
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Attaches process-level diagnostics. The core never fills these itself.
    pub fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }
}

/// Timing and memory figures measured around a solve call by the process layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Wall time of the whole solve call.
    pub wall_time: Option<Duration>,
    /// Growth of the peak resident set over the solve call, in bytes, where the platform
    /// exposes it.
    pub peak_memory_delta: Option<u64>,
}
