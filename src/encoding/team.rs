use super::grid::AssignmentGrid;
use crate::backend::Backend;
use crate::backend::Literal;
use crate::basic_types::HashSet;
use crate::model::Instance;
use crate::model::OneTeam;
use crate::model::User;

/// Encodes the one-team constraints.
///
/// Exactly one team-active flag per constraint is true. Members of an inactive team are
/// barred from every step of the constraint, and users belonging to none of the teams are
/// barred outright. A user listed in several teams is barred whenever any one of those teams
/// is inactive.
pub(crate) fn encode<B: Backend>(instance: &Instance, grid: &AssignmentGrid, backend: &mut B) {
    for constraint in instance.one_team() {
        encode_constraint(constraint, grid, backend);
    }
}

fn encode_constraint<B: Backend>(
    constraint: &OneTeam,
    grid: &AssignmentGrid,
    backend: &mut B,
) {
    let flags: Vec<Literal> = (0..constraint.teams().len())
        .map(|index| Literal::new(backend.new_variable(&format!("team{index}")), true))
        .collect();
    backend.add_clause(&flags);
    for (position, &first) in flags.iter().enumerate() {
        for &second in &flags[position + 1..] {
            backend.add_clause(&[!first, !second]);
        }
    }

    for (team, &flag) in constraint.teams().iter().zip(&flags) {
        for &step in constraint.steps() {
            for &user in team {
                backend.add_implication(!flag, !grid.literal(step, user));
            }
        }
    }

    // The steps are reserved for declared team members, whichever team is active.
    let mut members: HashSet<User> = HashSet::default();
    for team in constraint.teams() {
        members.extend(team.iter().copied());
    }
    for &step in constraint.steps() {
        for user in grid.users() {
            if !members.contains(&user) {
                backend.add_clause(&[!grid.literal(step, user)]);
            }
        }
    }
}
