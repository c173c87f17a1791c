#![cfg(test)]
use crate::backend::EnumerationBackend;
use crate::backend::IncrementalBackend;
use crate::model::Instance;
use crate::model::Step;
use crate::termination::Indefinite;
use crate::Multiplicity;
use crate::SolutionCount;
use crate::SolveResult;
use crate::SolveStatus;
use crate::Solver;
use crate::SolverOptions;

fn solve_both_with_limit(instance: &Instance, solution_limit: u64) -> (SolveResult, SolveResult) {
    let options = SolverOptions {
        solution_limit,
        ..SolverOptions::default()
    };
    let enumeration = Solver::with_options(EnumerationBackend::default(), options)
        .satisfy(instance, &mut Indefinite)
        .unwrap();
    let incremental = Solver::with_options(IncrementalBackend::default(), options)
        .satisfy(instance, &mut Indefinite)
        .unwrap();
    (enumeration, incremental)
}

#[test]
fn a_forced_assignment_is_unique() {
    let instance = Instance::new(1, 1);

    let (enumeration, incremental) = solve_both_with_limit(&instance, 1000);

    assert_eq!(enumeration.multiplicity(), Multiplicity::Unique);
    assert_eq!(incremental.multiplicity(), Multiplicity::Unique);
}

#[test]
fn the_solution_limit_caps_the_probe() {
    // 4 solutions exist, but the probe stops counting at 2.
    let instance = Instance::new(2, 2);

    let (enumeration, incremental) = solve_both_with_limit(&instance, 2);

    for result in [enumeration, incremental] {
        assert_eq!(result.status(), SolveStatus::Satisfiable);
        assert_eq!(
            result.multiplicity(),
            Multiplicity::Multiple(SolutionCount::AtLeast(2))
        );
    }
}

#[test]
fn a_limit_of_one_leaves_the_question_open() {
    let instance = Instance::new(2, 2);

    let (enumeration, incremental) = solve_both_with_limit(&instance, 1);

    for result in [enumeration, incremental] {
        assert_eq!(result.status(), SolveStatus::Satisfiable);
        assert_eq!(result.assignment().len(), 2);
        assert_eq!(result.multiplicity(), Multiplicity::Undetermined);
    }
}

#[test]
fn exact_counts_match_between_backends() {
    let mut two_solutions = Instance::new(2, 2);
    two_solutions.add_separation_of_duty(Step::new(0), Step::new(1));
    let four_solutions = Instance::new(2, 2);

    for (instance, expected) in [(two_solutions, 2), (four_solutions, 4)] {
        let (enumeration, incremental) = solve_both_with_limit(&instance, 1000);
        assert_eq!(
            enumeration.multiplicity(),
            Multiplicity::Multiple(SolutionCount::Exact(expected))
        );
        assert_eq!(enumeration.multiplicity(), incremental.multiplicity());
    }
}

#[test]
fn a_limit_exactly_at_the_count_reports_at_least() {
    // The probe cannot tell "limit reached" from "more remain" without one further solve.
    let instance = Instance::new(2, 2);

    let (enumeration, incremental) = solve_both_with_limit(&instance, 4);

    for result in [enumeration, incremental] {
        assert_eq!(
            result.multiplicity(),
            Multiplicity::Multiple(SolutionCount::AtLeast(4))
        );
    }
}
