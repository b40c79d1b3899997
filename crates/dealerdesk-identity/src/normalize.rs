//! [`normalize`]: raw profile payload to canonical [`Identity`].

use dealerdesk_core::Identity;
use serde_json::Value;

use crate::{
  candidate::{collect_candidates, select_winner},
  error::NormalizeError,
  payload::{any_flag, first_string_at, object_at, role_ref, string_at},
};

/// Turn one raw profile payload into a canonical [`Identity`].
///
/// The payload may wrap the profile one level deep under `user`. A cached
/// identity blob is just another payload and goes through the same checks.
///
/// # Errors
///
/// - [`NormalizeError::MalformedPayload`] if `raw` is not an object.
/// - [`NormalizeError::MissingRole`] if the profile has no `role` key, or
///   its `role` is null and the winning affiliation carries none either. No
///   default role is ever substituted.
/// - [`NormalizeError::InvalidProfile`] if the role has no name.
pub fn normalize(raw: &Value) -> Result<Identity, NormalizeError> {
  let root = raw.as_object().ok_or(NormalizeError::MalformedPayload)?;
  let profile = object_at(root, "user").unwrap_or(root);

  let mut role = profile
    .get("role")
    .ok_or(NormalizeError::MissingRole)
    .map(role_ref)?;

  let subject_id = first_string_at(profile, &["subjectId", "subject_id"])
    .or_else(|| string_at(profile, "id"));

  let mut primary_affiliation_id = string_at(profile, "primaryAffiliationId");
  let mut primary_affiliation = None;
  let mut affiliation_code =
    first_string_at(profile, &["affiliationCode", "dealershipCode"]);
  let mut employee_reference =
    first_string_at(profile, &["employeeReference", "employeeId"]);

  let candidates = collect_candidates(profile);
  let candidate_count = candidates.len();
  let winner = select_winner(candidates);

  if let Some(winner) = &winner {
    tracing::debug!(
      candidates = candidate_count,
      affiliation_id = ?winner.affiliation_id,
      primary = winner.is_primary,
      "selected affiliation"
    );
    primary_affiliation = Some(winner.snapshot());
    if winner.affiliation_code.is_some() {
      affiliation_code = winner.affiliation_code.clone();
    }
    if employee_reference.is_none() {
      employee_reference = winner.employee_reference.clone();
    }
    if role.is_none() {
      role = winner.role.clone();
    }
  }

  if primary_affiliation_id.is_none() {
    primary_affiliation_id = string_at(profile, "dealershipId")
      .or_else(|| winner.as_ref().and_then(|w| w.affiliation_id.clone()))
      .or_else(|| primary_affiliation.as_ref().and_then(|a| a.id.clone()))
      .or_else(|| string_at(profile, "primaryDealershipId"))
      .or_else(|| string_at(profile, "activeDealershipId"));
  }

  // The winner's id is authoritative once computed, whether or not the
  // current id already looks valid. Without one the current id stands.
  if let Some(id) = winner.and_then(|w| w.affiliation_id) {
    primary_affiliation_id = Some(id);
  }

  if let (Some(snapshot), Some(id)) =
    (primary_affiliation.as_mut(), primary_affiliation_id.as_ref())
  {
    snapshot.id = Some(id.clone());
  }

  let role = role.ok_or(NormalizeError::MissingRole)?;
  if role.name.trim().is_empty() {
    return Err(NormalizeError::InvalidProfile("role has no name".into()));
  }

  let active = match (profile.get("active"), profile.get("isActive")) {
    (None, None) => true,
    _ => any_flag(profile, &["active", "isActive"]),
  };

  Ok(Identity {
    subject_id,
    email: string_at(profile, "email"),
    display_name: display_name(profile),
    role,
    primary_affiliation_id,
    primary_affiliation,
    affiliation_code,
    employee_reference,
    active,
  })
}

fn display_name(profile: &serde_json::Map<String, Value>) -> Option<String> {
  if let Some(name) = first_string_at(profile, &["displayName", "name"]) {
    return Some(name);
  }
  let parts: Vec<String> = ["firstName", "lastName"]
    .iter()
    .filter_map(|k| string_at(profile, k))
    .collect();
  (!parts.is_empty()).then(|| parts.join(" "))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn non_objects_are_malformed() {
    for raw in [json!(null), json!("ADMIN"), json!([{ "role": "ADMIN" }]), json!(3)] {
      assert_eq!(normalize(&raw), Err(NormalizeError::MalformedPayload));
    }
  }

  #[test]
  fn user_wrapper_is_unwrapped() {
    let id = normalize(&json!({
      "user": { "subjectId": "sub-9", "role": "TEAM_LEAD" },
      "role": "ADMIN",
    }))
    .unwrap();
    assert_eq!(id.subject_id.as_deref(), Some("sub-9"));
    assert_eq!(id.role.name, "TEAM_LEAD");
  }

  #[test]
  fn legacy_id_backfills_subject() {
    let id = normalize(&json!({ "id": 311, "role": "ADMIN" })).unwrap();
    assert_eq!(id.subject_id.as_deref(), Some("311"));

    let id = normalize(&json!({ "id": 311, "subjectId": "sub", "role": "ADMIN" })).unwrap();
    assert_eq!(id.subject_id.as_deref(), Some("sub"));
  }

  #[test]
  fn null_role_counts_as_missing() {
    assert_eq!(
      normalize(&json!({ "role": null })),
      Err(NormalizeError::MissingRole)
    );
  }

  #[test]
  fn nameless_role_is_invalid() {
    assert!(matches!(
      normalize(&json!({ "role": { "id": "r1" } })),
      Err(NormalizeError::InvalidProfile(_))
    ));
    assert!(matches!(
      normalize(&json!({ "role": "   " })),
      Err(NormalizeError::InvalidProfile(_))
    ));
  }

  #[test]
  fn role_object_keeps_its_id() {
    let id = normalize(&json!({ "role": { "id": "r-5", "name": "SALES_MANAGER" } })).unwrap();
    assert_eq!(id.role.id, "r-5");
    assert_eq!(id.role.name, "SALES_MANAGER");
  }

  #[test]
  fn absent_role_is_not_taken_from_assignments() {
    assert_eq!(
      normalize(&json!({
        "assignments": [{
          "role": "TEAM_LEAD",
          "dealership": { "id": "123e4567-e89b-12d3-a456-426614174000" },
        }],
      })),
      Err(NormalizeError::MissingRole)
    );
  }

  #[test]
  fn winner_supplies_null_role_and_employee() {
    let id = normalize(&json!({
      "role": null,
      "assignments": [{
        "role": "TEAM_LEAD",
        "employeeId": "E-77",
        "dealership": { "id": "123e4567-e89b-12d3-a456-426614174000" },
      }],
    }))
    .unwrap();
    assert_eq!(id.role.name, "TEAM_LEAD");
    assert_eq!(id.employee_reference.as_deref(), Some("E-77"));
  }

  #[test]
  fn profile_role_is_not_overridden_by_winner() {
    let id = normalize(&json!({
      "role": "ADMIN",
      "employeeId": "E-1",
      "assignments": [{ "role": "TEAM_LEAD", "employeeId": "E-77" }],
    }))
    .unwrap();
    assert_eq!(id.role.name, "ADMIN");
    assert_eq!(id.employee_reference.as_deref(), Some("E-1"));
  }

  #[test]
  fn fallback_ids_in_order() {
    let id = normalize(&json!({
      "role": "ADMIN",
      "primaryDealershipId": "pd",
      "activeDealershipId": "ad",
    }))
    .unwrap();
    assert_eq!(id.primary_affiliation_id.as_deref(), Some("pd"));

    let id = normalize(&json!({ "role": "ADMIN", "activeDealershipId": "ad" })).unwrap();
    assert_eq!(id.primary_affiliation_id.as_deref(), Some("ad"));

    let id = normalize(&json!({ "role": "ADMIN", "dealershipId": 17, "primaryDealershipId": "pd" }))
      .unwrap();
    assert_eq!(id.primary_affiliation_id.as_deref(), Some("17"));
  }

  #[test]
  fn winner_id_overrides_existing_ids() {
    let uuid = "123e4567-e89b-12d3-a456-426614174000";
    // Stale legacy id.
    let id = normalize(&json!({
      "role": "ADMIN",
      "dealershipId": "42",
      "dealership": { "id": uuid },
    }))
    .unwrap();
    assert_eq!(id.primary_affiliation_id.as_deref(), Some(uuid));

    // Already valid id: the winner still wins.
    let other = "9b2f3c1e-4d5a-4e6f-8a7b-0c1d2e3f4a5b";
    let id = normalize(&json!({
      "role": "ADMIN",
      "primaryAffiliationId": other,
      "dealership": { "id": uuid },
    }))
    .unwrap();
    assert_eq!(id.primary_affiliation_id.as_deref(), Some(uuid));
  }

  #[test]
  fn winner_without_id_leaves_existing_id() {
    let id = normalize(&json!({
      "role": "ADMIN",
      "dealershipId": "42",
      "dealership": { "code": "NSM", "name": "Northside" },
    }))
    .unwrap();
    assert_eq!(id.primary_affiliation_id.as_deref(), Some("42"));
    let snapshot = id.primary_affiliation.unwrap();
    assert_eq!(snapshot.id.as_deref(), Some("42"));
    assert_eq!(snapshot.code.as_deref(), Some("NSM"));
    assert_eq!(id.affiliation_code.as_deref(), Some("NSM"));
  }

  #[test]
  fn active_defaults_to_true() {
    assert!(normalize(&json!({ "role": "ADMIN" })).unwrap().active);
    assert!(!normalize(&json!({ "role": "ADMIN", "isActive": false })).unwrap().active);
    assert!(!normalize(&json!({ "role": "ADMIN", "active": 0 })).unwrap().active);
  }

  #[test]
  fn display_name_sources() {
    let id = normalize(&json!({ "role": "ADMIN", "firstName": "Ada", "lastName": "Byron" })).unwrap();
    assert_eq!(id.display_name.as_deref(), Some("Ada Byron"));
    let id = normalize(&json!({ "role": "ADMIN", "name": "A. B." })).unwrap();
    assert_eq!(id.display_name.as_deref(), Some("A. B."));
  }
}
