//! Which staff members' records a role may read.

use std::collections::BTreeSet;

use dealerdesk_core::{
  Role,
  team::{Owned, TeamMember},
};
use serde::Serialize;

/// Coarse visibility flags, as the UI layers consume them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityScope {
  /// Every record in the dealership.
  pub see_all:  bool,
  /// Records of the viewer's team.
  pub see_team: bool,
  /// The viewer's own records; always true.
  pub see_own:  bool,
}

pub fn visibility_scope(role: Role) -> VisibilityScope {
  VisibilityScope {
    see_all:  matches!(role, Role::Admin | Role::GeneralManager),
    see_team: matches!(role, Role::Admin | Role::GeneralManager | Role::SalesManager),
    see_own:  true,
  }
}

/// Whether a viewer holding `viewer` sees members holding `member`.
/// `None` is a role outside the hierarchy.
fn sees(viewer: Role, member: Option<Role>) -> bool {
  match viewer {
    Role::Admin | Role::GeneralManager => true,
    Role::SalesManager => {
      matches!(member, Some(Role::TeamLead | Role::CustomerAdvisor))
    }
    Role::TeamLead => member == Some(Role::CustomerAdvisor),
    Role::CustomerAdvisor => false,
  }
}

/// The subject ids whose records `role` may read.
///
/// Admins and general managers see exactly the directory. A sales manager
/// sees team leads and advisors, a team lead sees advisors, and an advisor
/// sees only `current_subject_id`.
pub fn visible_subject_ids(
  role: Role,
  current_subject_id: &str,
  directory: &[TeamMember],
) -> BTreeSet<String> {
  if role == Role::CustomerAdvisor {
    return BTreeSet::from([current_subject_id.to_owned()]);
  }
  directory
    .iter()
    .filter(|member| sees(role, member.role))
    .map(|member| member.subject_id.clone())
    .collect()
}

/// Keep the records owned by, or assigned to, a visible subject. Records
/// owned by or assigned to `current_subject_id` are always kept.
///
/// Idempotent: filtering the output again with the same arguments returns it
/// unchanged.
pub fn filter_by_visibility<T, I>(
  records: I,
  role: Role,
  current_subject_id: &str,
  directory: &[TeamMember],
) -> Vec<T>
where
  T: Owned,
  I: IntoIterator<Item = T>,
{
  let visible = visible_subject_ids(role, current_subject_id, directory);
  let is_visible =
    |id: Option<&str>| id.is_some_and(|id| id == current_subject_id || visible.contains(id));

  records
    .into_iter()
    .filter(|record| is_visible(record.owner_id()) || is_visible(record.assignee_id()))
    .collect()
}
