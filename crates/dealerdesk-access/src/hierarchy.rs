//! Authority ranks and the comparisons built on them.

use std::collections::BTreeSet;

use dealerdesk_core::Role;

/// Authority rank of `role`: 1 is the most senior, 5 the most junior.
pub const fn rank(role: Role) -> u8 {
  match role {
    Role::Admin => 1,
    Role::GeneralManager => 2,
    Role::SalesManager => 3,
    Role::TeamLead => 4,
    Role::CustomerAdvisor => 5,
  }
}

/// Whether `manager` may manage data belonging to `subject`. Strictly
/// senior only; peers cannot manage each other.
pub fn can_manage(manager: Role, subject: Role) -> bool { rank(manager) < rank(subject) }

/// Every role `manager` outranks.
pub fn manageable_roles(manager: Role) -> BTreeSet<Role> {
  Role::ALL
    .into_iter()
    .filter(|subject| can_manage(manager, *subject))
    .collect()
}

/// Whether `viewer` may see data owned by someone holding `owner`: peers and
/// seniors can.
pub fn can_view(viewer: Role, owner: Role) -> bool { rank(viewer) <= rank(owner) }
