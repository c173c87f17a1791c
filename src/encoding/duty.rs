use super::grid::AssignmentGrid;
use crate::backend::Backend;
use crate::model::Instance;

/// Encodes separation-of-duty and binding-of-duty pairs.
///
/// Separation forbids any user from performing both steps of a pair. Binding links the two
/// cells of every user with an equivalence; together with the assignment encoding this forces
/// the same performer on both steps.
pub(crate) fn encode<B: Backend>(instance: &Instance, grid: &AssignmentGrid, backend: &mut B) {
    for &(first, second) in instance.separation_of_duty() {
        for user in instance.users() {
            backend.add_clause(&[!grid.literal(first, user), !grid.literal(second, user)]);
        }
    }
    for &(first, second) in instance.binding_of_duty() {
        for user in instance.users() {
            backend.add_equivalence(grid.literal(first, user), grid.literal(second, user));
        }
    }
}
