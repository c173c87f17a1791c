use std::fmt;

use crate::model::Step;
use crate::model::User;

/// A witness assignment: for every step, the user performing it, in ascending step order.
///
/// Rendering an [`Assignment`] with [`fmt::Display`] produces one `s<i>: u<j>` line per step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    pairs: Vec<(Step, User)>,
}

impl Assignment {
    pub(crate) fn new(pairs: Vec<(Step, User)>) -> Assignment {
        Assignment { pairs }
    }

    /// The number of assigned steps.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no step is assigned. This is the case for unsatisfiable instances, for timed out
    /// solves, and for instances without any step.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The user performing `step`, if the assignment covers it.
    pub fn user_for(&self, step: Step) -> Option<User> {
        self.pairs
            .iter()
            .find(|(assigned_step, _)| *assigned_step == step)
            .map(|(_, user)| *user)
    }

    /// Iterates over the `(step, user)` pairs in ascending step order.
    pub fn iter(&self) -> impl Iterator<Item = (Step, User)> + '_ {
        self.pairs.iter().copied()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (step, user)) in self.pairs.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{step}: {user}")?;
        }
        Ok(())
    }
}
