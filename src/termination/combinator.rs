use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers as soon as either of the two wrapped conditions
/// triggers.
#[derive(Clone, Copy, Debug)]
pub struct Combinator<First, Second> {
    first: First,
    second: Second,
}

impl<First, Second> Combinator<First, Second> {
    pub fn new(first: First, second: Second) -> Combinator<First, Second> {
        Combinator { first, second }
    }
}

impl<First, Second> TerminationCondition for Combinator<First, Second>
where
    First: TerminationCondition,
    Second: TerminationCondition,
{
    fn should_stop(&mut self) -> bool {
        self.first.should_stop() || self.second.should_stop()
    }

    fn encountered_conflict(&mut self) {
        self.first.encountered_conflict();
        self.second.encountered_conflict();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::ConflictBudget;
    use crate::termination::Indefinite;

    #[test]
    fn triggers_when_either_side_triggers() {
        let mut combined = Combinator::new(Indefinite, ConflictBudget::with_budget(1));
        assert!(!combined.should_stop());
        combined.encountered_conflict();
        assert!(combined.should_stop());
    }
}
