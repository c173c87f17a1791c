use super::grid::AssignmentGrid;
use crate::backend::Backend;
use crate::model::Instance;

/// Forbids every declared user from the steps outside their authorised set.
///
/// Users without a declared authorisation list stay unrestricted; a declared but empty list
/// forbids every step. The two cases must not collapse into each other.
pub(crate) fn encode<B: Backend>(instance: &Instance, grid: &AssignmentGrid, backend: &mut B) {
    for user in instance.users() {
        if !instance.has_declared_authorisations(user) {
            continue;
        }
        for step in instance.steps() {
            if !instance.is_authorised(user, step) {
                backend.add_clause(&[!grid.literal(step, user)]);
            }
        }
    }
}
