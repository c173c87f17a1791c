use std::num::NonZero;

use enumset::EnumSetType;

use super::Step;
use super::User;

/// The constraint families an instance can contain, used to summarise instances in logs and
/// statistics.
#[derive(EnumSetType, Debug)]
pub enum ConstraintKind {
    Authorisation,
    SeparationOfDuty,
    BindingOfDuty,
    AtMostK,
    OneTeam,
}

/// A bound on the number of *distinct* users performing a given set of steps.
///
/// Note that this is not a bound on the number of assignments; a single user performing every
/// step in the set satisfies any bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtMostK {
    pub(crate) k: NonZero<u32>,
    /// Sorted and free of duplicates.
    pub(crate) steps: Vec<Step>,
}

impl AtMostK {
    /// The bound on the number of distinct performers.
    pub fn k(&self) -> NonZero<u32> {
        self.k
    }

    /// The steps the bound ranges over.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Requires all steps in a set to be performed by members of a single team from a list of
/// candidate teams.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OneTeam {
    /// Sorted and free of duplicates.
    pub(crate) steps: Vec<Step>,
    /// Each team is non-empty. A user may appear in more than one team.
    pub(crate) teams: Vec<Vec<User>>,
}

impl OneTeam {
    /// The steps covered by the constraint.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The candidate teams.
    pub fn teams(&self) -> &[Vec<User>] {
        &self.teams
    }
}
