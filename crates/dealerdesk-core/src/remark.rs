//! Per-role remark columns on customer records.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// The remark column a role authors into. Each role owns exactly one.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum RemarkField {
  AdminRemarks,
  GeneralManagerRemarks,
  SalesManagerRemarks,
  TeamLeadRemarks,
  AdvisorRemarks,
}

impl RemarkField {
  /// Every field, in the same seniority order as [`Role::ALL`].
  pub const ALL: [RemarkField; 5] = [
    RemarkField::AdminRemarks,
    RemarkField::GeneralManagerRemarks,
    RemarkField::SalesManagerRemarks,
    RemarkField::TeamLeadRemarks,
    RemarkField::AdvisorRemarks,
  ];

  /// The record key the field is stored under, e.g. `"teamLeadRemarks"`.
  pub fn key(&self) -> &'static str {
    match self {
      Self::AdminRemarks => "adminRemarks",
      Self::GeneralManagerRemarks => "generalManagerRemarks",
      Self::SalesManagerRemarks => "salesManagerRemarks",
      Self::TeamLeadRemarks => "teamLeadRemarks",
      Self::AdvisorRemarks => "advisorRemarks",
    }
  }

  /// The role that owns this column.
  pub fn owner(&self) -> Role {
    match self {
      Self::AdminRemarks => Role::Admin,
      Self::GeneralManagerRemarks => Role::GeneralManager,
      Self::SalesManagerRemarks => Role::SalesManager,
      Self::TeamLeadRemarks => Role::TeamLead,
      Self::AdvisorRemarks => Role::CustomerAdvisor,
    }
  }
}

/// Who wrote a remark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemarkAuthor {
  pub id:   String,
  #[serde(default)]
  pub role: Option<Role>,
}

/// A single remark left on a customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remark {
  pub remark_id:  String,
  pub field:      RemarkField,
  pub body:       String,
  #[serde(default)]
  pub cancelled:  bool,
  pub created_by: RemarkAuthor,
}
