//! The fixed dealership role hierarchy.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One of the five dealership staff roles.
///
/// Variants are declared from most to least senior, so the derived `Ord`
/// sorts by seniority. Authority ranks live in `dealerdesk-access`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
  Admin,
  GeneralManager,
  SalesManager,
  TeamLead,
  CustomerAdvisor,
}

impl Role {
  /// Every role, most senior first.
  pub const ALL: [Role; 5] = [
    Role::Admin,
    Role::GeneralManager,
    Role::SalesManager,
    Role::TeamLead,
    Role::CustomerAdvisor,
  ];

  /// The wire name, e.g. `"SALES_MANAGER"`.
  pub fn as_str(&self) -> &'static str { self.into() }

  /// Parse a role label as backends actually send it.
  ///
  /// Case-insensitive; spaces and hyphens are read as underscores, so
  /// `"Sales Manager"` and `"sales-manager"` both yield
  /// [`Role::SalesManager`].
  pub fn from_label(label: &str) -> Result<Self> {
    let canonical: String = label
      .trim()
      .chars()
      .map(|c| match c {
        ' ' | '-' => '_',
        c => c.to_ascii_uppercase(),
      })
      .collect();
    canonical
      .parse()
      .map_err(|_| Error::UnknownRole(label.to_owned()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wire_names_round_trip() {
    for role in Role::ALL {
      assert_eq!(Role::from_label(role.as_str()).unwrap(), role);
      assert_eq!(role.to_string(), role.as_str());
    }
  }

  #[test]
  fn labels_are_lenient() {
    assert_eq!(Role::from_label("Sales Manager").unwrap(), Role::SalesManager);
    assert_eq!(Role::from_label(" team-lead ").unwrap(), Role::TeamLead);
    assert_eq!(
      Role::from_label("customer_advisor").unwrap(),
      Role::CustomerAdvisor
    );
  }

  #[test]
  fn unknown_label_is_an_error() {
    assert!(matches!(
      Role::from_label("JANITOR"),
      Err(Error::UnknownRole(label)) if label == "JANITOR"
    ));
  }

  #[test]
  fn serde_uses_wire_names() {
    let json = serde_json::to_string(&Role::GeneralManager).unwrap();
    assert_eq!(json, "\"GENERAL_MANAGER\"");
  }
}
