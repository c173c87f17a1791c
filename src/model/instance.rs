use std::fmt;
use std::num::NonZero;

use enumset::EnumSet;

use super::AtMostK;
use super::ConstraintKind;
use super::OneTeam;
use super::Step;
use super::User;
use crate::basic_types::HashSet;
use crate::warrant_assert_simple;

/// A workflow satisfiability instance: a number of steps, a pool of users, and the constraints
/// restricting which users may perform which steps.
///
/// Authorisations are asymmetric: a user for whom no authorisation was ever declared may
/// perform any step, while a user with a declared but empty authorisation list may perform
/// none. Both cases occur in instance files and they are not interchangeable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    step_count: usize,
    user_count: usize,
    /// `None` means the user was never declared; `Some` holds the authorised steps.
    authorisations: Vec<Option<HashSet<Step>>>,
    separation_of_duty: Vec<(Step, Step)>,
    binding_of_duty: Vec<(Step, Step)>,
    at_most_k: Vec<AtMostK>,
    one_team: Vec<OneTeam>,
}

impl Instance {
    /// Creates an instance without any constraints.
    pub fn new(step_count: usize, user_count: usize) -> Instance {
        Instance {
            step_count,
            user_count,
            authorisations: vec![None; user_count],
            separation_of_duty: Vec::new(),
            binding_of_duty: Vec::new(),
            at_most_k: Vec::new(),
            one_team: Vec::new(),
        }
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn user_count(&self) -> usize {
        self.user_count
    }

    /// Iterates over all steps of the instance in ascending order.
    pub fn steps(&self) -> impl Iterator<Item = Step> {
        (0..self.step_count as u32).map(Step::new)
    }

    /// Iterates over all users of the instance in ascending order.
    pub fn users(&self) -> impl Iterator<Item = User> {
        (0..self.user_count as u32).map(User::new)
    }

    /// Declares `user` to be authorised for exactly the given steps. Declaring the same user
    /// more than once extends their authorised set; declaring a user with no steps authorises
    /// them for nothing.
    pub fn add_authorisations(&mut self, user: User, steps: impl IntoIterator<Item = Step>) {
        self.assert_user(user);
        let authorised = self.authorisations[user.index()].get_or_insert_with(HashSet::default);
        for step in steps {
            warrant_assert_simple!(
                step.index() < self.step_count,
                "step {step} is out of range"
            );
            let _ = authorised.insert(step);
        }
    }

    /// Requires `first` and `second` to be performed by different users.
    pub fn add_separation_of_duty(&mut self, first: Step, second: Step) {
        self.assert_step(first);
        self.assert_step(second);
        self.separation_of_duty.push((first, second));
    }

    /// Requires `first` and `second` to be performed by the same user.
    pub fn add_binding_of_duty(&mut self, first: Step, second: Step) {
        self.assert_step(first);
        self.assert_step(second);
        self.binding_of_duty.push((first, second));
    }

    /// Bounds the number of distinct users performing the given steps by `k`.
    pub fn add_at_most_k(&mut self, k: NonZero<u32>, steps: impl IntoIterator<Item = Step>) {
        let mut steps: Vec<Step> = steps.into_iter().collect();
        warrant_assert_simple!(!steps.is_empty(), "an at-most-k constraint needs steps");
        for step in &steps {
            self.assert_step(*step);
        }
        steps.sort_unstable();
        steps.dedup();
        self.at_most_k.push(AtMostK { k, steps });
    }

    /// Requires the given steps to be performed by members of a single one of the given teams.
    pub fn add_one_team(
        &mut self,
        steps: impl IntoIterator<Item = Step>,
        teams: Vec<Vec<User>>,
    ) {
        let mut steps: Vec<Step> = steps.into_iter().collect();
        warrant_assert_simple!(!steps.is_empty(), "a one-team constraint needs steps");
        warrant_assert_simple!(!teams.is_empty(), "a one-team constraint needs teams");
        for step in &steps {
            self.assert_step(*step);
        }
        steps.sort_unstable();
        steps.dedup();
        let teams = teams
            .into_iter()
            .map(|mut team| {
                warrant_assert_simple!(!team.is_empty(), "a team needs members");
                for user in &team {
                    self.assert_user(*user);
                }
                team.sort_unstable();
                team.dedup();
                team
            })
            .collect();
        self.one_team.push(OneTeam { steps, teams });
    }

    /// Whether `user` may perform `step` under the declared authorisations.
    pub fn is_authorised(&self, user: User, step: Step) -> bool {
        self.assert_user(user);
        self.assert_step(step);
        match &self.authorisations[user.index()] {
            None => true,
            Some(authorised) => authorised.contains(&step),
        }
    }

    /// Whether an authorisation list was ever declared for `user`.
    pub fn has_declared_authorisations(&self, user: User) -> bool {
        self.assert_user(user);
        self.authorisations[user.index()].is_some()
    }

    pub fn separation_of_duty(&self) -> &[(Step, Step)] {
        &self.separation_of_duty
    }

    pub fn binding_of_duty(&self) -> &[(Step, Step)] {
        &self.binding_of_duty
    }

    pub fn at_most_k(&self) -> &[AtMostK] {
        &self.at_most_k
    }

    pub fn one_team(&self) -> &[OneTeam] {
        &self.one_team
    }

    /// The constraint families present in this instance.
    pub fn constraint_kinds(&self) -> EnumSet<ConstraintKind> {
        let mut kinds = EnumSet::new();
        if self.authorisations.iter().any(Option::is_some) {
            kinds |= ConstraintKind::Authorisation;
        }
        if !self.separation_of_duty.is_empty() {
            kinds |= ConstraintKind::SeparationOfDuty;
        }
        if !self.binding_of_duty.is_empty() {
            kinds |= ConstraintKind::BindingOfDuty;
        }
        if !self.at_most_k.is_empty() {
            kinds |= ConstraintKind::AtMostK;
        }
        if !self.one_team.is_empty() {
            kinds |= ConstraintKind::OneTeam;
        }
        kinds
    }

    /// The number of constraint lines [`fmt::Display`] renders for this instance. Merged
    /// authorisation declarations count once.
    pub fn constraint_count(&self) -> usize {
        self.authorisations.iter().filter(|a| a.is_some()).count()
            + self.separation_of_duty.len()
            + self.binding_of_duty.len()
            + self.at_most_k.len()
            + self.one_team.len()
    }

    fn assert_step(&self, step: Step) {
        warrant_assert_simple!(step.index() < self.step_count, "step {step} is out of range");
    }

    fn assert_user(&self, user: User) {
        warrant_assert_simple!(user.index() < self.user_count, "user {user} is out of range");
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#Steps: {}", self.step_count)?;
        writeln!(f, "#Users: {}", self.user_count)?;
        writeln!(f, "#Constraints: {}", self.constraint_count())?;
        for user in self.users() {
            if let Some(authorised) = &self.authorisations[user.index()] {
                write!(f, "Authorisations {user}")?;
                let mut sorted: Vec<Step> = authorised.iter().copied().collect();
                sorted.sort_unstable();
                for step in sorted {
                    write!(f, " {step}")?;
                }
                writeln!(f)?;
            }
        }
        for (first, second) in &self.separation_of_duty {
            writeln!(f, "Separation-of-duty {first} {second}")?;
        }
        for (first, second) in &self.binding_of_duty {
            writeln!(f, "Binding-of-duty {first} {second}")?;
        }
        for constraint in &self.at_most_k {
            write!(f, "At-most-k {}", constraint.k)?;
            for step in &constraint.steps {
                write!(f, " {step}")?;
            }
            writeln!(f)?;
        }
        for constraint in &self.one_team {
            write!(f, "One-team")?;
            for step in &constraint.steps {
                write!(f, " {step}")?;
            }
            for team in &constraint.teams {
                write!(f, " (")?;
                for (index, user) in team.iter().enumerate() {
                    if index > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{user}")?;
                }
                write!(f, ")")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
