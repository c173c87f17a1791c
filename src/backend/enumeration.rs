use log::trace;

use super::Backend;
use super::BackendError;
use super::Literal;
use super::Variable;
use super::DEFAULT_LITERAL_BUDGET;
use crate::basic_types::HashSet;
use crate::basic_types::SolveStatus;
use crate::statistics::log_statistic;
use crate::termination::TerminationCondition;

/// A backend which enumerates models through an explicit chronological depth-first search.
///
/// Variables are decided in creation order, `true` before `false`. After every assignment the
/// constraints mentioning the assigned variable are checked, and a violated constraint
/// triggers chronological backtracking. The search suspends whenever it stands on a full
/// model and resumes from exactly that point on the next [`Backend::solve_next`] call, which
/// makes enumeration one continuous walk of the search tree. Models whose restriction to the
/// projection variables was already reported are skipped.
#[derive(Debug)]
pub struct EnumerationBackend {
    names: Vec<String>,
    constraints: Vec<StoredConstraint>,
    /// For every variable, the indices of the constraints it occurs in.
    occurrences: Vec<Vec<usize>>,
    literal_budget: usize,
    literal_count: usize,
    trivially_unsat: bool,

    /// Values of the first `depth` variables; `None` above the current depth.
    values: Vec<Option<bool>>,
    /// The number of assigned variables. Variable `i` is decided at depth `i`.
    depth: usize,
    /// Whether the second polarity was already tried at each depth.
    flipped: Vec<bool>,
    /// Whether the most recent assignment still has to be checked against its constraints.
    needs_check: bool,
    phase: Phase,
    seen_projections: HashSet<Vec<bool>>,
    counters: Counters,
}

#[derive(Debug)]
enum StoredConstraint {
    Clause(Vec<Literal>),
    LinearLe { literals: Vec<Literal>, bound: usize },
    Implication { condition: Literal, consequent: Literal },
    Equivalence { first: Literal, second: Literal },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// No search has run since the last reset.
    Fresh,
    /// The search is suspended standing on a full model.
    AtModel,
    /// The search is suspended between nodes, after a timeout.
    MidTree,
    /// The whole tree has been walked.
    Exhausted,
}

#[derive(Debug, Default, Clone, Copy)]
struct Counters {
    decisions: u64,
    conflicts: u64,
    models: u64,
}

impl EnumerationBackend {
    /// Creates a backend which refuses models larger than `literal_budget` literals.
    pub fn with_literal_budget(literal_budget: usize) -> EnumerationBackend {
        EnumerationBackend {
            names: Vec::new(),
            constraints: Vec::new(),
            occurrences: Vec::new(),
            literal_budget,
            literal_count: 0,
            trivially_unsat: false,
            values: Vec::new(),
            depth: 0,
            flipped: Vec::new(),
            needs_check: false,
            phase: Phase::Fresh,
            seen_projections: HashSet::default(),
            counters: Counters::default(),
        }
    }

    fn store(&mut self, constraint: StoredConstraint) {
        let index = self.constraints.len();
        match &constraint {
            StoredConstraint::Clause(literals)
            | StoredConstraint::LinearLe { literals, .. } => {
                for literal in literals {
                    self.occurrences[literal.variable().index()].push(index);
                }
            }
            StoredConstraint::Implication {
                condition: first,
                consequent: second,
            }
            | StoredConstraint::Equivalence { first, second } => {
                self.occurrences[first.variable().index()].push(index);
                self.occurrences[second.variable().index()].push(index);
            }
        }
        self.constraints.push(constraint);
    }

    fn literal_value(&self, literal: Literal) -> Option<bool> {
        self.values[literal.variable().index()].map(|value| literal.value_given(value))
    }

    fn is_violated(&self, constraint: &StoredConstraint) -> bool {
        match constraint {
            StoredConstraint::Clause(literals) => literals
                .iter()
                .all(|literal| self.literal_value(*literal) == Some(false)),
            StoredConstraint::LinearLe { literals, bound } => {
                let true_count = literals
                    .iter()
                    .filter(|literal| self.literal_value(**literal) == Some(true))
                    .count();
                true_count > *bound
            }
            StoredConstraint::Implication {
                condition,
                consequent,
            } => {
                self.literal_value(*condition) == Some(true)
                    && self.literal_value(*consequent) == Some(false)
            }
            StoredConstraint::Equivalence { first, second } => {
                match (self.literal_value(*first), self.literal_value(*second)) {
                    (Some(first_value), Some(second_value)) => first_value != second_value,
                    _ => false,
                }
            }
        }
    }

    fn last_assignment_violates(&self) -> bool {
        let variable = self.depth - 1;
        self.occurrences[variable]
            .iter()
            .any(|&index| self.is_violated(&self.constraints[index]))
    }

    /// Reverts to the deepest decision whose second polarity is untried and takes it.
    /// Returns false when the tree is exhausted.
    fn backtrack(&mut self) -> bool {
        while self.depth > 0 {
            let variable = self.depth - 1;
            if self.flipped[variable] {
                self.values[variable] = None;
                self.depth -= 1;
            } else {
                self.flipped[variable] = true;
                self.values[variable] = Some(false);
                return true;
            }
        }
        false
    }

    /// Walks the tree from the current position to the next full model.
    fn advance(&mut self, termination: &mut dyn TerminationCondition) -> SolveStatus {
        loop {
            if termination.should_stop() {
                self.phase = Phase::MidTree;
                return SolveStatus::Timeout;
            }
            if self.needs_check {
                if self.last_assignment_violates() {
                    self.counters.conflicts += 1;
                    termination.encountered_conflict();
                    if !self.backtrack() {
                        self.phase = Phase::Exhausted;
                        return SolveStatus::Unsatisfiable;
                    }
                    // the flipped assignment has to be checked as well
                    continue;
                }
                self.needs_check = false;
            }
            if self.depth == self.values.len() {
                self.counters.models += 1;
                self.phase = Phase::AtModel;
                return SolveStatus::Satisfiable;
            }
            trace!(
                "enumeration: deciding {} = true at depth {}",
                self.names[self.depth],
                self.depth
            );
            self.values[self.depth] = Some(true);
            self.flipped[self.depth] = false;
            self.depth += 1;
            self.counters.decisions += 1;
            self.needs_check = true;
        }
    }

    fn project(&self, variables: &[Variable]) -> Vec<bool> {
        variables
            .iter()
            .map(|variable| self.values[variable.index()].unwrap_or(false))
            .collect()
    }

    fn reset_search(&mut self) {
        for value in &mut self.values {
            *value = None;
        }
        for flip in &mut self.flipped {
            *flip = false;
        }
        self.depth = 0;
        self.needs_check = false;
        self.phase = Phase::Fresh;
        self.seen_projections.clear();
    }

    fn check_capacity(&self) -> Result<(), BackendError> {
        if self.literal_count > self.literal_budget {
            return Err(BackendError::CapacityExceeded {
                limit: self.literal_budget,
            });
        }
        Ok(())
    }
}

impl Default for EnumerationBackend {
    fn default() -> EnumerationBackend {
        EnumerationBackend::with_literal_budget(DEFAULT_LITERAL_BUDGET)
    }
}

impl Backend for EnumerationBackend {
    fn name(&self) -> &'static str {
        "enumeration"
    }

    fn new_variable(&mut self, name: &str) -> Variable {
        let variable = Variable::new(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.values.push(None);
        self.flipped.push(false);
        self.occurrences.push(Vec::new());
        variable
    }

    fn add_clause(&mut self, literals: &[Literal]) {
        if literals.is_empty() {
            self.trivially_unsat = true;
            return;
        }
        self.literal_count += literals.len();
        self.store(StoredConstraint::Clause(literals.to_vec()));
    }

    fn add_linear_le(&mut self, literals: &[Literal], bound: usize) {
        self.literal_count += literals.len();
        self.store(StoredConstraint::LinearLe {
            literals: literals.to_vec(),
            bound,
        });
    }

    fn add_implication(&mut self, condition: Literal, consequent: Literal) {
        self.literal_count += 2;
        self.store(StoredConstraint::Implication {
            condition,
            consequent,
        });
    }

    fn add_equivalence(&mut self, first: Literal, second: Literal) {
        self.literal_count += 2;
        self.store(StoredConstraint::Equivalence { first, second });
    }

    fn solve(
        &mut self,
        termination: &mut dyn TerminationCondition,
    ) -> Result<SolveStatus, BackendError> {
        self.check_capacity()?;
        if self.trivially_unsat {
            return Ok(SolveStatus::Unsatisfiable);
        }
        self.reset_search();
        Ok(self.advance(termination))
    }

    fn solve_next(
        &mut self,
        project_onto: &[Variable],
        termination: &mut dyn TerminationCondition,
    ) -> Result<SolveStatus, BackendError> {
        self.check_capacity()?;
        if self.trivially_unsat {
            return Ok(SolveStatus::Unsatisfiable);
        }
        loop {
            match self.phase {
                Phase::Exhausted => return Ok(SolveStatus::Unsatisfiable),
                Phase::AtModel => {
                    // Remember the model we are standing on, then step off it.
                    let projection = self.project(project_onto);
                    let _ = self.seen_projections.insert(projection);
                    if !self.backtrack() {
                        self.phase = Phase::Exhausted;
                        return Ok(SolveStatus::Unsatisfiable);
                    }
                    self.needs_check = true;
                    self.phase = Phase::MidTree;
                }
                Phase::Fresh | Phase::MidTree => {}
            }
            match self.advance(termination) {
                SolveStatus::Satisfiable => {
                    let projection = self.project(project_onto);
                    if !self.seen_projections.contains(&projection) {
                        let _ = self.seen_projections.insert(projection);
                        return Ok(SolveStatus::Satisfiable);
                    }
                    // A model differing only in variables outside the projection; keep
                    // walking. The loop steps off it through the `AtModel` arm.
                }
                other => return Ok(other),
            }
        }
    }

    fn value(&self, variable: Variable) -> bool {
        self.values[variable.index()].unwrap_or(false)
    }

    fn log_statistics(&self) {
        log_statistic("numberOfDecisions", self.counters.decisions);
        log_statistic("numberOfConflicts", self.counters.conflicts);
        log_statistic("numberOfModels", self.counters.models);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::Indefinite;

    fn positive(variable: Variable) -> Literal {
        Literal::new(variable, true)
    }

    #[test]
    fn enumerates_all_models_of_a_single_clause() {
        let mut backend = EnumerationBackend::default();
        let a = backend.new_variable("a");
        let b = backend.new_variable("b");
        backend.add_clause(&[positive(a), positive(b)]);

        let grid = [a, b];
        let mut termination = Indefinite;

        assert_eq!(
            backend.solve(&mut termination),
            Ok(SolveStatus::Satisfiable)
        );
        // True-first order makes the first model all-true.
        assert!(backend.value(a));
        assert!(backend.value(b));

        let mut models = 1;
        while backend.solve_next(&grid, &mut termination) == Ok(SolveStatus::Satisfiable) {
            models += 1;
        }
        assert_eq!(models, 3);
    }

    #[test]
    fn empty_clause_is_unsatisfiable() {
        let mut backend = EnumerationBackend::default();
        let _ = backend.new_variable("a");
        backend.add_clause(&[]);
        assert_eq!(
            backend.solve(&mut Indefinite),
            Ok(SolveStatus::Unsatisfiable)
        );
    }

    #[test]
    fn exceeding_the_budget_fails_the_solve() {
        let mut backend = EnumerationBackend::with_literal_budget(1);
        let a = backend.new_variable("a");
        let b = backend.new_variable("b");
        backend.add_clause(&[positive(a), positive(b)]);
        assert_eq!(
            backend.solve(&mut Indefinite),
            Err(BackendError::CapacityExceeded { limit: 1 })
        );
    }

    #[test]
    fn equivalence_links_variables() {
        let mut backend = EnumerationBackend::default();
        let a = backend.new_variable("a");
        let b = backend.new_variable("b");
        backend.add_equivalence(positive(a), positive(b));
        backend.add_clause(&[!positive(a)]);

        assert_eq!(
            backend.solve(&mut Indefinite),
            Ok(SolveStatus::Satisfiable)
        );
        assert!(!backend.value(a));
        assert!(!backend.value(b));
    }
}
