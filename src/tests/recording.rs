//! A [`Backend`] which stores every added constraint verbatim, so tests can assert on the
//! shape of an encoding without running a search.

use crate::backend::Backend;
use crate::backend::BackendError;
use crate::backend::Literal;
use crate::backend::Variable;
use crate::basic_types::SolveStatus;
use crate::termination::TerminationCondition;

/// One constraint as it was handed to the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Recorded {
    Clause(Vec<Literal>),
    LinearLe {
        literals: Vec<Literal>,
        bound: usize,
    },
    Implication {
        condition: Literal,
        consequent: Literal,
    },
    Equivalence {
        first: Literal,
        second: Literal,
    },
}

#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub(crate) names: Vec<String>,
    pub(crate) recorded: Vec<Recorded>,
}

impl RecordingBackend {
    pub(crate) fn clauses(&self) -> impl Iterator<Item = &[Literal]> {
        self.recorded.iter().filter_map(|entry| match entry {
            Recorded::Clause(literals) => Some(literals.as_slice()),
            _ => None,
        })
    }

    pub(crate) fn linear_rows(&self) -> impl Iterator<Item = (&[Literal], usize)> {
        self.recorded.iter().filter_map(|entry| match entry {
            Recorded::LinearLe { literals, bound } => Some((literals.as_slice(), *bound)),
            _ => None,
        })
    }

    pub(crate) fn implications(&self) -> impl Iterator<Item = (Literal, Literal)> + '_ {
        self.recorded.iter().filter_map(|entry| match entry {
            Recorded::Implication {
                condition,
                consequent,
            } => Some((*condition, *consequent)),
            _ => None,
        })
    }

    pub(crate) fn equivalences(&self) -> impl Iterator<Item = (Literal, Literal)> + '_ {
        self.recorded.iter().filter_map(|entry| match entry {
            Recorded::Equivalence { first, second } => Some((*first, *second)),
            _ => None,
        })
    }

    /// The number of variables whose tracing name starts with `prefix`.
    pub(crate) fn variables_named(&self, prefix: &str) -> usize {
        self.names
            .iter()
            .filter(|name| name.starts_with(prefix))
            .count()
    }

    pub(crate) fn contains_clause(&self, clause: &[Literal]) -> bool {
        self.clauses().any(|recorded| recorded == clause)
    }
}

impl Backend for RecordingBackend {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn new_variable(&mut self, name: &str) -> Variable {
        let variable = Variable::new(self.names.len() as u32);
        self.names.push(name.to_owned());
        variable
    }

    fn add_clause(&mut self, literals: &[Literal]) {
        self.recorded.push(Recorded::Clause(literals.to_vec()));
    }

    fn add_linear_le(&mut self, literals: &[Literal], bound: usize) {
        self.recorded.push(Recorded::LinearLe {
            literals: literals.to_vec(),
            bound,
        });
    }

    fn add_implication(&mut self, condition: Literal, consequent: Literal) {
        self.recorded.push(Recorded::Implication {
            condition,
            consequent,
        });
    }

    fn add_equivalence(&mut self, first: Literal, second: Literal) {
        self.recorded.push(Recorded::Equivalence { first, second });
    }

    fn solve(
        &mut self,
        _termination: &mut dyn TerminationCondition,
    ) -> Result<SolveStatus, BackendError> {
        Ok(SolveStatus::Unsatisfiable)
    }

    fn solve_next(
        &mut self,
        _project_onto: &[Variable],
        _termination: &mut dyn TerminationCondition,
    ) -> Result<SolveStatus, BackendError> {
        Ok(SolveStatus::Unsatisfiable)
    }

    fn value(&self, _variable: Variable) -> bool {
        false
    }

    fn log_statistics(&self) {}
}
