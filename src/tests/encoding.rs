#![cfg(test)]
use std::num::NonZero;

use super::recording::RecordingBackend;
use crate::encoding;
use crate::model::Instance;
use crate::model::Step;
use crate::model::User;

#[test]
fn the_grid_is_created_row_major_with_report_style_names() {
    let instance = Instance::new(2, 3);
    let mut backend = RecordingBackend::default();

    let grid = encoding::encode(&instance, None, &mut backend);

    assert_eq!(
        backend.names,
        vec!["s1: u1", "s1: u2", "s1: u3", "s2: u1", "s2: u2", "s2: u3"]
    );
    assert_eq!(grid.variables().len(), 6);
    assert_eq!(grid.variable(Step::new(1), User::new(0)).index(), 3);
}

#[test]
fn every_step_gets_an_at_least_one_and_pairwise_at_most_one() {
    let instance = Instance::new(2, 3);
    let mut backend = RecordingBackend::default();

    let _ = encoding::encode(&instance, None, &mut backend);

    let at_least_one = backend
        .clauses()
        .filter(|clause| clause.len() == 3 && clause.iter().all(|literal| literal.is_positive()))
        .count();
    let at_most_one = backend
        .clauses()
        .filter(|clause| clause.len() == 2 && clause.iter().all(|literal| !literal.is_positive()))
        .count();
    assert_eq!(at_least_one, 2);
    // 3 users give 3 pairs per step.
    assert_eq!(at_most_one, 6);
    assert_eq!(backend.recorded.len(), 8);
}

#[test]
fn a_declared_empty_authorisation_blocks_every_step() {
    let mut instance = Instance::new(2, 2);
    instance.add_authorisations(User::new(0), []);
    let mut backend = RecordingBackend::default();

    let grid = encoding::encode(&instance, None, &mut backend);

    for step in instance.steps() {
        assert!(backend.contains_clause(&[!grid.literal(step, User::new(0))]));
    }
    let units = backend.clauses().filter(|clause| clause.len() == 1).count();
    assert_eq!(units, 2, "the undeclared user must stay unrestricted");
}

#[test]
fn authorised_steps_are_left_open() {
    let mut instance = Instance::new(2, 2);
    instance.add_authorisations(User::new(0), [Step::new(0)]);
    let mut backend = RecordingBackend::default();

    let grid = encoding::encode(&instance, None, &mut backend);

    assert!(!backend.contains_clause(&[!grid.literal(Step::new(0), User::new(0))]));
    assert!(backend.contains_clause(&[!grid.literal(Step::new(1), User::new(0))]));
}

#[test]
fn separation_adds_one_binary_clause_per_user() {
    let mut instance = Instance::new(2, 2);
    instance.add_separation_of_duty(Step::new(0), Step::new(1));
    let mut backend = RecordingBackend::default();

    let grid = encoding::encode(&instance, None, &mut backend);

    for user in instance.users() {
        assert!(backend.contains_clause(&[
            !grid.literal(Step::new(0), user),
            !grid.literal(Step::new(1), user),
        ]));
    }
}

#[test]
fn binding_adds_one_equivalence_per_user() {
    let mut instance = Instance::new(2, 3);
    instance.add_binding_of_duty(Step::new(0), Step::new(1));
    let mut backend = RecordingBackend::default();

    let grid = encoding::encode(&instance, None, &mut backend);

    let equivalences: Vec<_> = backend.equivalences().collect();
    assert_eq!(equivalences.len(), 3);
    for user in instance.users() {
        assert!(equivalences.contains(&(
            grid.literal(Step::new(0), user),
            grid.literal(Step::new(1), user),
        )));
    }
}

#[test]
fn pair_indicators_are_shared_across_combinations() {
    let mut instance = Instance::new(4, 2);
    instance.add_at_most_k(
        NonZero::new(2).unwrap(),
        [Step::new(0), Step::new(1), Step::new(2), Step::new(3)],
    );
    let mut backend = RecordingBackend::default();

    let _ = encoding::encode(&instance, None, &mut backend);

    // 4 choose 2 pairs, not one indicator per combination occurrence.
    assert_eq!(backend.variables_named("Equal_"), 6);
    let combination_clauses = backend
        .clauses()
        .filter(|clause| clause.len() == 3 && clause.iter().all(|literal| literal.is_positive()))
        .count();
    // 4 choose 3 combinations, each requiring one of its 3 pairs to share a performer.
    assert_eq!(combination_clauses, 4);
}

#[test]
fn a_vacuous_cardinality_bound_encodes_to_nothing() {
    let mut constrained = Instance::new(3, 2);
    constrained.add_at_most_k(
        NonZero::new(3).unwrap(),
        [Step::new(0), Step::new(1), Step::new(2)],
    );
    let unconstrained = Instance::new(3, 2);

    let mut with = RecordingBackend::default();
    let mut without = RecordingBackend::default();
    let _ = encoding::encode(&constrained, None, &mut with);
    let _ = encoding::encode(&unconstrained, None, &mut without);

    assert_eq!(with.recorded, without.recorded);
    assert_eq!(with.names, without.names);
}

#[test]
fn one_team_activates_exactly_one_flag() {
    let mut instance = Instance::new(2, 3);
    instance.add_one_team(
        [Step::new(0)],
        vec![vec![User::new(0)], vec![User::new(1), User::new(2)]],
    );
    let mut backend = RecordingBackend::default();

    let _ = encoding::encode(&instance, None, &mut backend);

    assert_eq!(backend.variables_named("team"), 2);
    assert_eq!(backend.names[6..], ["team0", "team1"]);
    let flag_choices = backend
        .clauses()
        .filter(|clause| clause.len() == 2 && clause.iter().all(|literal| literal.is_positive()))
        .count();
    assert_eq!(flag_choices, 1);
    // One implication per member of an inactive team per covered step.
    assert_eq!(backend.implications().count(), 3);
    // Everyone belongs to some team, so nobody is blocked outright.
    assert_eq!(backend.clauses().filter(|clause| clause.len() == 1).count(), 0);
}

#[test]
fn users_outside_every_team_are_blocked_on_the_covered_steps() {
    let mut instance = Instance::new(1, 3);
    instance.add_one_team(
        [Step::new(0)],
        vec![vec![User::new(0)], vec![User::new(1)]],
    );
    let mut backend = RecordingBackend::default();

    let grid = encoding::encode(&instance, None, &mut backend);

    let units: Vec<_> = backend
        .clauses()
        .filter(|clause| clause.len() == 1)
        .collect();
    assert_eq!(units, vec![&[!grid.literal(Step::new(0), User::new(2))][..]]);
}

#[test]
fn the_workload_cap_adds_one_row_per_user() {
    let instance = Instance::new(3, 2);
    let mut backend = RecordingBackend::default();

    let grid = encoding::encode(&instance, NonZero::new(2), &mut backend);

    let rows: Vec<_> = backend.linear_rows().collect();
    assert_eq!(rows.len(), 2);
    for (user, &(literals, bound)) in instance.users().zip(&rows) {
        assert_eq!(bound, 2);
        let column: Vec<_> = instance.steps().map(|step| grid.literal(step, user)).collect();
        assert_eq!(literals, column);
    }
}

#[test]
fn a_cap_at_least_the_step_count_is_dropped() {
    let instance = Instance::new(3, 2);
    let mut backend = RecordingBackend::default();

    let _ = encoding::encode(&instance, NonZero::new(3), &mut backend);

    assert_eq!(backend.linear_rows().count(), 0);
}
