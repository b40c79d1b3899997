//! Field-level remark permissions.

use dealerdesk_core::{
  Role,
  remark::{Remark, RemarkField},
};

use crate::hierarchy::can_view;

/// The one remark column `role` authors into.
pub fn writable_remark_field(role: Role) -> RemarkField {
  match role {
    Role::Admin => RemarkField::AdminRemarks,
    Role::GeneralManager => RemarkField::GeneralManagerRemarks,
    Role::SalesManager => RemarkField::SalesManagerRemarks,
    Role::TeamLead => RemarkField::TeamLeadRemarks,
    Role::CustomerAdvisor => RemarkField::AdvisorRemarks,
  }
}

/// Every column `role` may write. Admins may write all of them; everyone
/// else only their own.
pub fn writable_remark_fields(role: Role) -> Vec<RemarkField> {
  match role {
    Role::Admin => RemarkField::ALL.to_vec(),
    other => vec![writable_remark_field(other)],
  }
}

/// The columns `role` may read: those written by roles it can view.
pub fn readable_remark_fields(role: Role) -> Vec<RemarkField> {
  RemarkField::ALL
    .into_iter()
    .filter(|field| can_view(role, field.owner()))
    .collect()
}

/// Whether `actor` may cancel `remark`.
///
/// Cancelled remarks stay cancelled. Otherwise everyone from team lead up
/// may cancel any remark, and anyone may cancel their own.
pub fn can_cancel_remark(actor_role: Role, actor_id: &str, remark: &Remark) -> bool {
  if remark.cancelled {
    return false;
  }
  let senior = !matches!(actor_role, Role::CustomerAdvisor);
  senior || remark.created_by.id == actor_id
}
