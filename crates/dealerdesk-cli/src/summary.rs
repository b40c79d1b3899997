//! Printable access summary for a resolved identity.

use std::collections::BTreeSet;

use dealerdesk_access::{
  VisibilityScope, manageable_roles, rank, readable_remark_fields, visibility_scope,
  writable_remark_fields,
};
use dealerdesk_core::{Identity, Role, remark::RemarkField};
use serde::Serialize;

/// Everything the access layer says about one role.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessSummary {
  pub role:                   Role,
  pub rank:                   u8,
  pub scope:                  VisibilityScope,
  pub manageable_roles:       BTreeSet<Role>,
  pub writable_remark_fields: Vec<RemarkField>,
  pub readable_remark_fields: Vec<RemarkField>,
}

impl AccessSummary {
  pub fn for_role(role: Role) -> Self {
    Self {
      role,
      rank: rank(role),
      scope: visibility_scope(role),
      manageable_roles: manageable_roles(role),
      writable_remark_fields: writable_remark_fields(role),
      readable_remark_fields: readable_remark_fields(role),
    }
  }
}

/// What the binary prints after resolving a session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
  /// `"cached"`, `"fresh"`, or absent for offline normalization.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source:   Option<&'static str>,
  pub identity: &'a Identity,
  /// Absent when the role is outside the fixed hierarchy.
  pub access:   Option<AccessSummary>,
}

impl<'a> Report<'a> {
  pub fn new(identity: &'a Identity, source: Option<&'static str>) -> Self {
    let access = identity.role_level().map(AccessSummary::for_role);
    if access.is_none() {
      tracing::warn!(role = %identity.role.name, "role is outside the dealership hierarchy");
    }
    Self { source, identity, access }
  }
}

#[cfg(test)]
mod tests {
  use dealerdesk_core::RoleRef;

  use super::*;

  fn identity(role: &str) -> Identity {
    Identity {
      subject_id:             Some("sub-1".into()),
      email:                  None,
      display_name:           None,
      role:                   RoleRef::from_name(role),
      primary_affiliation_id: None,
      primary_affiliation:    None,
      affiliation_code:       None,
      employee_reference:     None,
      active:                 true,
    }
  }

  #[test]
  fn summary_serializes_wire_names() {
    let id = identity("Team Lead");
    let json = serde_json::to_value(Report::new(&id, Some("fresh"))).unwrap();
    assert_eq!(json["source"], "fresh");
    assert_eq!(json["access"]["role"], "TEAM_LEAD");
    assert_eq!(json["access"]["rank"], 4);
    assert_eq!(json["access"]["scope"]["seeOwn"], true);
    assert_eq!(json["access"]["manageableRoles"], serde_json::json!(["CUSTOMER_ADVISOR"]));
    assert_eq!(json["access"]["writableRemarkFields"], serde_json::json!(["teamLeadRemarks"]));
  }

  #[test]
  fn unknown_roles_have_no_access_summary() {
    let id = identity("Valet");
    let report = Report::new(&id, None);
    assert!(report.access.is_none());
    let json = serde_json::to_value(report).unwrap();
    assert!(json.get("source").is_none());
    assert!(json["access"].is_null());
  }
}
