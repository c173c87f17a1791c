use std::num::NonZero;

use log::debug;

use super::grid::AssignmentGrid;
use crate::backend::Backend;
use crate::backend::Literal;

/// Caps the number of steps any single user performs: one linear row per user over their
/// column of the grid.
pub(crate) fn encode<B: Backend>(
    grid: &AssignmentGrid,
    max_steps_per_user: NonZero<u32>,
    backend: &mut B,
) {
    let bound = max_steps_per_user.get() as usize;
    if bound >= grid.step_count() {
        debug!(
            "a workload cap of {bound} over {} steps is vacuous",
            grid.step_count()
        );
        return;
    }
    for user in grid.users() {
        let column: Vec<Literal> = grid.steps().map(|step| grid.literal(step, user)).collect();
        backend.add_linear_le(&column, bound);
    }
}
