use crate::backend::Backend;
use crate::backend::Literal;
use crate::backend::Variable;
use crate::basic_types::Assignment;
use crate::model::Step;
use crate::model::User;
use crate::warrant_assert_eq_simple;

/// The `steps x users` matrix of decision variables of one solve call.
///
/// `variable(s, u)` is true in a model exactly when user `u` performs step `s`. The grid is
/// created through [`Backend::new_variable`] in row-major order, which also fixes the decision
/// order of the backends. Auxiliary variables created later by the encoders are not part of
/// the grid.
#[derive(Debug)]
pub(crate) struct AssignmentGrid {
    step_count: usize,
    user_count: usize,
    variables: Vec<Variable>,
}

impl AssignmentGrid {
    pub(crate) fn new<B: Backend>(
        step_count: usize,
        user_count: usize,
        backend: &mut B,
    ) -> AssignmentGrid {
        let mut variables = Vec::with_capacity(step_count * user_count);
        for step in 0..step_count {
            for user in 0..user_count {
                let name = format!("{}: {}", Step::new(step as u32), User::new(user as u32));
                variables.push(backend.new_variable(&name));
            }
        }
        AssignmentGrid {
            step_count,
            user_count,
            variables,
        }
    }

    pub(crate) fn step_count(&self) -> usize {
        self.step_count
    }

    pub(crate) fn steps(&self) -> impl Iterator<Item = Step> {
        (0..self.step_count as u32).map(Step::new)
    }

    pub(crate) fn users(&self) -> impl Iterator<Item = User> {
        (0..self.user_count as u32).map(User::new)
    }

    pub(crate) fn variable(&self, step: Step, user: User) -> Variable {
        self.variables[step.index() * self.user_count + user.index()]
    }

    /// The positive literal of the cell `(step, user)`.
    pub(crate) fn literal(&self, step: Step, user: User) -> Literal {
        Literal::new(self.variable(step, user), true)
    }

    /// All grid variables in row-major order; the projection target for model enumeration.
    pub(crate) fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Reads the performer of every step out of the backend's current model.
    ///
    /// The assignment encoding guarantees exactly one performer per step; this is checked
    /// here as a post-condition rather than derived again.
    pub(crate) fn extract_assignment<B: Backend>(&self, backend: &B) -> Assignment {
        let mut pairs = Vec::with_capacity(self.step_count);
        for step in self.steps() {
            let performers: Vec<User> = self
                .users()
                .filter(|&user| backend.value(self.variable(step, user)))
                .collect();
            warrant_assert_eq_simple!(
                performers.len(),
                1,
                "step {step} must have exactly one performer"
            );
            pairs.extend(performers.into_iter().map(|user| (step, user)));
        }
        Assignment::new(pairs)
    }
}
