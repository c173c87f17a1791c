use super::grid::AssignmentGrid;
use crate::backend::Backend;
use crate::backend::Literal;

/// Requires exactly one user per step: one at-least-one clause over the step's row plus
/// pairwise at-most-one clauses.
///
/// With an empty user pool the at-least-one clause is empty, which latches the backend as
/// trivially unsatisfiable. That is the intended reading of a workflow without users.
pub(crate) fn encode<B: Backend>(grid: &AssignmentGrid, backend: &mut B) {
    for step in grid.steps() {
        let row: Vec<Literal> = grid.users().map(|user| grid.literal(step, user)).collect();
        backend.add_clause(&row);
        for (position, &first) in row.iter().enumerate() {
            for &second in &row[position + 1..] {
                backend.add_clause(&[!first, !second]);
            }
        }
    }
}
