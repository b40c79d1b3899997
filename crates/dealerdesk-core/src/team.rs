//! Team directory entries consulted by visibility scoping.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// One staff member known to the session, with their hierarchy level.
///
/// `role` is `None` when the backend reported a role outside the fixed
/// hierarchy; such members are never visible to anyone but themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
  pub subject_id: String,
  pub role:       Option<Role>,
}

impl TeamMember {
  pub fn new(subject_id: impl Into<String>, role: Role) -> Self {
    Self { subject_id: subject_id.into(), role: Some(role) }
  }
}

/// A record that belongs to, or is assigned to, a staff member.
///
/// Implemented by leads, customers, follow-ups, and anything else the
/// access layer filters.
pub trait Owned {
  /// The subject that created or owns the record.
  fn owner_id(&self) -> Option<&str>;

  /// The subject the record is currently assigned to, if different.
  fn assignee_id(&self) -> Option<&str> { None }
}
