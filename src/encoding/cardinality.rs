use log::debug;

use super::grid::AssignmentGrid;
use crate::backend::Backend;
use crate::backend::Literal;
use crate::basic_types::HashMap;
use crate::model::AtMostK;
use crate::model::Instance;
use crate::model::Step;

/// Encodes the at-most-k constraints through a pigeonhole argument.
///
/// Counting distinct performers is not a linear sum over the grid, since a sum counts
/// assignments rather than users. Instead: if more than `k` distinct users performed the
/// steps, some `k + 1` of the steps would all have pairwise different performers. The
/// constraint therefore holds exactly when every `(k + 1)`-combination of the step set
/// contains at least one pair sharing its performer.
///
/// The number of combinations is binomial in the step set size. That cost is inherent to the
/// formulation and is bounded by the instance, not by the encoder.
pub(crate) fn encode<B: Backend>(instance: &Instance, grid: &AssignmentGrid, backend: &mut B) {
    for constraint in instance.at_most_k() {
        encode_constraint(constraint, grid, backend);
    }
}

fn encode_constraint<B: Backend>(
    constraint: &AtMostK,
    grid: &AssignmentGrid,
    backend: &mut B,
) {
    let steps = constraint.steps();
    let chosen = constraint.k().get() as usize + 1;
    if steps.len() < chosen {
        debug!(
            "at-most-{} over {} steps is vacuous",
            constraint.k(),
            steps.len()
        );
        return;
    }

    // One indicator per unordered step pair, shared by every combination containing the pair.
    let mut pair_indicators: HashMap<(Step, Step), Literal> = HashMap::default();
    for_each_combination(steps.len(), chosen, |combination| {
        let mut any_shared = Vec::with_capacity(combination.len() * (combination.len() - 1) / 2);
        for (position, &first) in combination.iter().enumerate() {
            for &second in &combination[position + 1..] {
                let pair = (steps[first], steps[second]);
                let indicator = match pair_indicators.get(&pair) {
                    Some(&indicator) => indicator,
                    None => {
                        let indicator =
                            same_performer_indicator(pair.0, pair.1, grid, backend);
                        let _ = pair_indicators.insert(pair, indicator);
                        indicator
                    }
                };
                any_shared.push(indicator);
            }
        }
        backend.add_clause(&any_shared);
    });
}

/// Creates a literal which, when true, forces `first` and `second` to have the same
/// performer.
fn same_performer_indicator<B: Backend>(
    first: Step,
    second: Step,
    grid: &AssignmentGrid,
    backend: &mut B,
) -> Literal {
    let name = format!("Equal_{first}_{second}");
    let indicator = Literal::new(backend.new_variable(&name), true);
    for user in grid.users() {
        let here = grid.literal(first, user);
        let there = grid.literal(second, user);
        backend.add_clause(&[!indicator, !here, there]);
        backend.add_clause(&[!indicator, !there, here]);
    }
    indicator
}

/// Calls `action` with every strictly increasing index vector of length `chosen` drawn from
/// `0..count`, in lexicographic order.
fn for_each_combination(count: usize, chosen: usize, mut action: impl FnMut(&[usize])) {
    if chosen == 0 || chosen > count {
        return;
    }
    let mut indices: Vec<usize> = (0..chosen).collect();
    loop {
        action(&indices);
        // The rightmost index which has not reached its final position yet.
        let movable = (0..chosen)
            .rev()
            .find(|&position| indices[position] != position + count - chosen);
        let Some(position) = movable else {
            return;
        };
        indices[position] += 1;
        for next in position + 1..chosen {
            indices[next] = indices[next - 1] + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_combinations(count: usize, chosen: usize) -> Vec<Vec<usize>> {
        let mut collected = Vec::new();
        for_each_combination(count, chosen, |combination| {
            collected.push(combination.to_vec());
        });
        collected
    }

    #[test]
    fn walks_all_combinations_in_lexicographic_order() {
        assert_eq!(
            collect_combinations(4, 3),
            vec![
                vec![0, 1, 2],
                vec![0, 1, 3],
                vec![0, 2, 3],
                vec![1, 2, 3],
            ]
        );
    }

    #[test]
    fn a_full_width_combination_is_yielded_once() {
        assert_eq!(collect_combinations(3, 3), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn oversized_requests_yield_nothing() {
        assert!(collect_combinations(2, 3).is_empty());
    }
}
