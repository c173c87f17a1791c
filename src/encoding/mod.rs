//! Translation of an [`Instance`] into backend constraints.
//!
//! The entry point is [`encode`]: it creates the [`AssignmentGrid`] and runs the encoders in
//! a fixed order over one shared backend. Each encoder is independent and only appends
//! constraints; none of them reads anything back. Auxiliary variables (pair-equality
//! indicators, team-active flags) stay internal to the model and are never part of the grid.

mod assignment;
mod authorisation;
mod cardinality;
mod duty;
mod grid;
mod team;
mod workload;

use std::num::NonZero;

use log::debug;

pub(crate) use grid::AssignmentGrid;

use crate::backend::Backend;
use crate::model::Instance;

/// Builds the grid and encodes the whole instance, including the optional workload cap.
pub(crate) fn encode<B: Backend>(
    instance: &Instance,
    max_steps_per_user: Option<NonZero<u32>>,
    backend: &mut B,
) -> AssignmentGrid {
    let grid = AssignmentGrid::new(instance.step_count(), instance.user_count(), backend);
    assignment::encode(&grid, backend);
    authorisation::encode(instance, &grid, backend);
    duty::encode(instance, &grid, backend);
    cardinality::encode(instance, &grid, backend);
    team::encode(instance, &grid, backend);
    if let Some(cap) = max_steps_per_user {
        workload::encode(&grid, cap, backend);
    }
    debug!(
        "encoded {} steps x {} users with constraint kinds {:?}",
        instance.step_count(),
        instance.user_count(),
        instance.constraint_kinds()
    );
    grid
}
