use log::trace;

use super::Backend;
use super::BackendError;
use super::Literal;
use super::Variable;
use super::DEFAULT_LITERAL_BUDGET;
use crate::basic_types::SolveStatus;
use crate::statistics::log_statistic;
use crate::termination::TerminationCondition;
use crate::warrant_assert_moderate;

/// A clause-based backend which probes for further models through blocking clauses.
///
/// Implications and equivalences are lowered to clauses when they are added. Linear
/// inequalities keep a dedicated row representation with true/false counters which is updated
/// as the trail grows and shrinks. The search itself is an iterative propagation loop with
/// chronological backtracking, deciding variables in creation order with `true` first.
///
/// [`Backend::solve_next`] forbids the restriction of the last model to the projection
/// variables with one clause and solves again from the root, so every reported model differs
/// from all earlier ones on the projection.
#[derive(Debug)]
pub struct IncrementalBackend {
    names: Vec<String>,
    clauses: Vec<Vec<Literal>>,
    /// For every variable, the indices of the clauses it occurs in.
    clause_occurrences: Vec<Vec<usize>>,
    rows: Vec<LinearRow>,
    /// For every variable, the rows it occurs in together with the occurring literal.
    row_occurrences: Vec<Vec<(usize, Literal)>>,
    literal_budget: usize,
    literal_count: usize,
    trivially_unsat: bool,

    values: Vec<Option<bool>>,
    /// Assigned variables in assignment order.
    trail: Vec<Variable>,
    /// The start of each decision level in `trail`.
    level_offsets: Vec<usize>,
    /// Whether the decision at each level already tried its second polarity.
    flipped: Vec<bool>,
    /// The next trail position to propagate from.
    propagation_head: usize,
    last_model: Option<Vec<bool>>,
    counters: Counters,
}

#[derive(Debug)]
struct LinearRow {
    literals: Vec<Literal>,
    bound: usize,
    true_count: usize,
    false_count: usize,
}

#[derive(Debug, Clone, Copy)]
enum ClauseStatus {
    Satisfied,
    Open,
    Unit(Literal),
    Falsified,
}

#[derive(Debug, Default, Clone, Copy)]
struct Counters {
    decisions: u64,
    propagations: u64,
    conflicts: u64,
    models: u64,
    blocking_clauses: u64,
}

impl IncrementalBackend {
    /// Creates a backend which refuses models larger than `literal_budget` literals.
    pub fn with_literal_budget(literal_budget: usize) -> IncrementalBackend {
        IncrementalBackend {
            names: Vec::new(),
            clauses: Vec::new(),
            clause_occurrences: Vec::new(),
            rows: Vec::new(),
            row_occurrences: Vec::new(),
            literal_budget,
            literal_count: 0,
            trivially_unsat: false,
            values: Vec::new(),
            trail: Vec::new(),
            level_offsets: Vec::new(),
            flipped: Vec::new(),
            propagation_head: 0,
            last_model: None,
            counters: Counters::default(),
        }
    }

    fn store_clause(&mut self, literals: Vec<Literal>) {
        let index = self.clauses.len();
        for literal in &literals {
            self.clause_occurrences[literal.variable().index()].push(index);
        }
        self.clauses.push(literals);
    }

    fn literal_value(&self, literal: Literal) -> Option<bool> {
        self.values[literal.variable().index()].map(|value| literal.value_given(value))
    }

    fn assign(&mut self, variable: Variable, value: bool) {
        warrant_assert_moderate!(
            self.values[variable.index()].is_none(),
            "a variable must not be assigned twice"
        );
        self.values[variable.index()] = Some(value);
        self.trail.push(variable);
        for position in 0..self.row_occurrences[variable.index()].len() {
            let (row_index, literal) = self.row_occurrences[variable.index()][position];
            let row = &mut self.rows[row_index];
            if literal.value_given(value) {
                row.true_count += 1;
            } else {
                row.false_count += 1;
            }
        }
    }

    fn unassign(&mut self, variable: Variable) {
        let Some(value) = self.values[variable.index()].take() else {
            return;
        };
        for position in 0..self.row_occurrences[variable.index()].len() {
            let (row_index, literal) = self.row_occurrences[variable.index()][position];
            let row = &mut self.rows[row_index];
            if literal.value_given(value) {
                row.true_count -= 1;
            } else {
                row.false_count -= 1;
            }
        }
    }

    /// Assigns a literal to true unless it already has a value. Returns false on conflict.
    fn enqueue(&mut self, literal: Literal) -> bool {
        match self.literal_value(literal) {
            Some(true) => true,
            Some(false) => false,
            None => {
                self.counters.propagations += 1;
                self.assign(literal.variable(), literal.is_positive());
                true
            }
        }
    }

    fn clause_status(&self, clause_index: usize) -> ClauseStatus {
        let mut open_count = 0;
        let mut open_literal = None;
        for &literal in &self.clauses[clause_index] {
            match self.literal_value(literal) {
                Some(true) => return ClauseStatus::Satisfied,
                Some(false) => {}
                None => {
                    open_count += 1;
                    open_literal = Some(literal);
                }
            }
        }
        match (open_count, open_literal) {
            (0, _) => ClauseStatus::Falsified,
            (1, Some(literal)) => ClauseStatus::Unit(literal),
            _ => ClauseStatus::Open,
        }
    }

    fn propagate_clauses(&mut self, variable: Variable) -> bool {
        for position in 0..self.clause_occurrences[variable.index()].len() {
            let clause_index = self.clause_occurrences[variable.index()][position];
            match self.clause_status(clause_index) {
                ClauseStatus::Satisfied | ClauseStatus::Open => {}
                ClauseStatus::Unit(literal) => {
                    if !self.enqueue(literal) {
                        return false;
                    }
                }
                ClauseStatus::Falsified => return false,
            }
        }
        true
    }

    fn propagate_rows(&mut self, variable: Variable) -> bool {
        for position in 0..self.row_occurrences[variable.index()].len() {
            let (row_index, _) = self.row_occurrences[variable.index()][position];
            let row = &self.rows[row_index];
            if row.true_count > row.bound {
                return false;
            }
            let assigned = row.true_count + row.false_count;
            if row.true_count == row.bound && assigned < row.literals.len() {
                // The bound is reached; the remaining literals must all be false.
                for literal_position in 0..self.rows[row_index].literals.len() {
                    let literal = self.rows[row_index].literals[literal_position];
                    if self.literal_value(literal).is_none() && !self.enqueue(!literal) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Propagates all pending trail entries. Returns false on conflict.
    fn propagate(&mut self) -> bool {
        while self.propagation_head < self.trail.len() {
            let variable = self.trail[self.propagation_head];
            self.propagation_head += 1;
            if !self.propagate_clauses(variable) || !self.propagate_rows(variable) {
                return false;
            }
        }
        true
    }

    fn next_unassigned(&self) -> Option<Variable> {
        self.values
            .iter()
            .position(Option::is_none)
            .map(|index| Variable::new(index as u32))
    }

    fn decide(&mut self, variable: Variable, value: bool) {
        trace!(
            "incremental: deciding {} = {value} at level {}",
            self.names[variable.index()],
            self.level_offsets.len() + 1
        );
        self.level_offsets.push(self.trail.len());
        self.flipped.push(false);
        self.counters.decisions += 1;
        self.assign(variable, value);
    }

    /// Unwinds decision levels until one can take its second polarity, and takes it.
    /// Returns false when no level remains.
    fn backtrack(&mut self) -> bool {
        while let Some(&offset) = self.level_offsets.last() {
            let decision = self.trail[offset];
            while self.trail.len() > offset {
                let Some(variable) = self.trail.pop() else {
                    break;
                };
                self.unassign(variable);
            }
            self.propagation_head = self.trail.len();
            let _ = self.level_offsets.pop();
            let was_flipped = self.flipped.pop().unwrap_or(true);
            if !was_flipped {
                // Decisions start with true, so the second polarity is false.
                self.level_offsets.push(self.trail.len());
                self.flipped.push(true);
                self.assign(decision, false);
                return true;
            }
        }
        false
    }

    fn restore_root(&mut self) {
        while let Some(variable) = self.trail.pop() {
            self.unassign(variable);
        }
        self.level_offsets.clear();
        self.flipped.clear();
        self.propagation_head = 0;
    }

    fn store_model(&mut self) {
        self.last_model = Some(
            self.values
                .iter()
                .map(|value| value.unwrap_or(false))
                .collect(),
        );
    }

    fn search(&mut self, termination: &mut dyn TerminationCondition) -> SolveStatus {
        loop {
            if termination.should_stop() {
                return SolveStatus::Timeout;
            }
            while !self.propagate() {
                self.counters.conflicts += 1;
                termination.encountered_conflict();
                if !self.backtrack() {
                    return SolveStatus::Unsatisfiable;
                }
            }
            match self.next_unassigned() {
                Some(variable) => self.decide(variable, true),
                None => {
                    self.counters.models += 1;
                    self.store_model();
                    return SolveStatus::Satisfiable;
                }
            }
        }
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

impl Default for IncrementalBackend {
    fn default() -> IncrementalBackend {
        IncrementalBackend::with_literal_budget(DEFAULT_LITERAL_BUDGET)
    }
}

impl Backend for IncrementalBackend {
    fn name(&self) -> &'static str {
        "incremental"
    }

    fn new_variable(&mut self, name: &str) -> Variable {
        let variable = Variable::new(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.values.push(None);
        self.clause_occurrences.push(Vec::new());
        self.row_occurrences.push(Vec::new());
        variable
    }

    fn add_clause(&mut self, literals: &[Literal]) {
        if literals.is_empty() {
            self.trivially_unsat = true;
            return;
        }
        self.literal_count += literals.len();
        self.store_clause(literals.to_vec());
    }

    fn add_linear_le(&mut self, literals: &[Literal], bound: usize) {
        self.literal_count += literals.len();
        let row_index = self.rows.len();
        for &literal in literals {
            self.row_occurrences[literal.variable().index()].push((row_index, literal));
        }
        self.rows.push(LinearRow {
            literals: literals.to_vec(),
            bound,
            true_count: 0,
            false_count: 0,
        });
    }

    fn add_implication(&mut self, condition: Literal, consequent: Literal) {
        self.literal_count += 2;
        self.store_clause(vec![!condition, consequent]);
    }

    fn add_equivalence(&mut self, first: Literal, second: Literal) {
        self.literal_count += 4;
        self.store_clause(vec![!first, second]);
        self.store_clause(vec![first, !second]);
    }

    fn solve(
        &mut self,
        termination: &mut dyn TerminationCondition,
    ) -> Result<SolveStatus, BackendError> {
        self.check_capacity()?;
        if self.trivially_unsat {
            return Ok(SolveStatus::Unsatisfiable);
        }
        self.restore_root();
        Ok(self.search(termination))
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
        if let Some(model) = &self.last_model {
            let blocking: Vec<Literal> = project_onto
                .iter()
                .map(|&variable| Literal::new(variable, !model[variable.index()]))
                .collect();
            self.restore_root();
            self.add_clause(&blocking);
            self.counters.blocking_clauses += 1;
            if self.trivially_unsat {
                // An empty projection means the one model on it is already known.
                return Ok(SolveStatus::Unsatisfiable);
            }
        } else {
            self.restore_root();
        }
        Ok(self.search(termination))
    }

    fn value(&self, variable: Variable) -> bool {
        match &self.last_model {
            Some(model) => model[variable.index()],
            None => false,
        }
    }

    fn log_statistics(&self) {
        log_statistic("numberOfDecisions", self.counters.decisions);
        log_statistic("numberOfPropagations", self.counters.propagations);
        log_statistic("numberOfConflicts", self.counters.conflicts);
        log_statistic("numberOfModels", self.counters.models);
        log_statistic("numberOfBlockingClauses", self.counters.blocking_clauses);
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
    fn conflicting_units_are_unsatisfiable() {
        let mut backend = IncrementalBackend::default();
        let a = backend.new_variable("a");
        backend.add_clause(&[positive(a)]);
        backend.add_clause(&[!positive(a)]);
        assert_eq!(
            backend.solve(&mut Indefinite),
            Ok(SolveStatus::Unsatisfiable)
        );
    }

    #[test]
    fn blocking_clauses_enumerate_a_free_variable() {
        let mut backend = IncrementalBackend::default();
        let a = backend.new_variable("a");

        assert_eq!(
            backend.solve(&mut Indefinite),
            Ok(SolveStatus::Satisfiable)
        );
        assert!(backend.value(a));

        assert_eq!(
            backend.solve_next(&[a], &mut Indefinite),
            Ok(SolveStatus::Satisfiable)
        );
        assert!(!backend.value(a));

        assert_eq!(
            backend.solve_next(&[a], &mut Indefinite),
            Ok(SolveStatus::Unsatisfiable)
        );
    }

    #[test]
    fn linear_row_caps_true_literals() {
        let mut backend = IncrementalBackend::default();
        let a = backend.new_variable("a");
        let b = backend.new_variable("b");
        let c = backend.new_variable("c");
        backend.add_linear_le(&[positive(a), positive(b), positive(c)], 1);
        backend.add_clause(&[positive(a)]);

        assert_eq!(
            backend.solve(&mut Indefinite),
            Ok(SolveStatus::Satisfiable)
        );
        assert!(backend.value(a));
        assert!(!backend.value(b));
        assert!(!backend.value(c));
    }

    #[test]
    fn implication_is_lowered_to_a_clause() {
        let mut backend = IncrementalBackend::default();
        let a = backend.new_variable("a");
        let b = backend.new_variable("b");
        backend.add_implication(positive(a), positive(b));
        backend.add_clause(&[!positive(b)]);

        assert_eq!(
            backend.solve(&mut Indefinite),
            Ok(SolveStatus::Satisfiable)
        );
        assert!(!backend.value(a));
        assert!(!backend.value(b));
    }
}
