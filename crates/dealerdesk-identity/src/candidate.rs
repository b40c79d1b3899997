//! Affiliation candidates and the precedence rule that picks one.
//!
//! A profile may mention a subject's dealership in half a dozen places, and
//! the mentions do not always agree. Every mention becomes an
//! [`AffiliationCandidate`]; [`select_winner`] reduces them to the one that
//! becomes authoritative. Candidates never outlive a single normalization.

use dealerdesk_core::{Affiliation, RoleRef};
use serde_json::Value;

use crate::{
  ident::is_uuid_like,
  payload::{
    Object, any_flag, first_object_at, first_string_at, object_at, role_ref,
    string_at,
  },
};

// ─── Payload shapes ──────────────────────────────────────────────────────────

/// Single-object sources, scanned in this order. Within one source the first
/// alias present wins.
const SINGLE_SOURCES: [&[&str]; 3] = [
  &["dealership", "affiliation"],
  &["primaryDealership", "primaryAffiliation"],
  &["activeDealership", "activeAffiliation"],
];

/// List sources, scanned after the single-object ones.
const LIST_SOURCES: [&[&str]; 3] = [
  &["dealerships", "affiliations"],
  &["assignments"],
  &["memberships"],
];

/// Keys under which an entry may nest the actual dealership object.
const NESTED_KEYS: [&str; 6] = [
  "dealership",
  "dealershipInfo",
  "dealershipDetails",
  "detail",
  "entity",
  "profile",
];

const ENTRY_PRIMARY_FLAGS: [&str; 5] =
  ["isPrimary", "primary", "isDefault", "default", "isActive"];
const NESTED_PRIMARY_FLAGS: [&str; 2] = ["isPrimary", "isDefault"];
const ACTIVE_FLAGS: [&str; 2] = ["isActive", "active"];

// ─── Candidate ───────────────────────────────────────────────────────────────

/// One place in the payload that might name the subject's dealership.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AffiliationCandidate {
  pub affiliation_id:       Option<String>,
  pub affiliation_code:     Option<String>,
  /// Marked primary, default, or active by any of the entry's flag fields.
  pub is_primary:           bool,
  /// The nested dealership object itself is marked active.
  pub is_active:            bool,
  /// The raw dealership object the entry points at.
  pub affiliation_snapshot: Object,
  pub employee_reference:   Option<String>,
  pub role:                 Option<RoleRef>,
}

impl AffiliationCandidate {
  /// Build a candidate from one raw entry.
  pub fn from_entry(entry: &Object) -> Self {
    let nested = first_object_at(entry, &NESTED_KEYS).unwrap_or(entry);

    let is_primary = any_flag(entry, &ENTRY_PRIMARY_FLAGS)
      || any_flag(nested, &NESTED_PRIMARY_FLAGS);

    let affiliation_id = string_at(entry, "dealershipId")
      .or_else(|| string_at(nested, "id"))
      .or_else(|| string_at(nested, "dealershipId"));

    let affiliation_code = first_string_at(nested, &["code", "dealershipCode"])
      .or_else(|| string_at(entry, "dealershipCode"));

    let employee_reference =
      first_string_at(entry, &["employeeId", "employeeReference"]).or_else(|| {
        object_at(entry, "employee").and_then(|e| string_at(e, "id"))
      });

    Self {
      affiliation_id,
      affiliation_code,
      is_primary,
      is_active: any_flag(nested, &ACTIVE_FLAGS),
      affiliation_snapshot: nested.clone(),
      employee_reference,
      role: entry.get("role").and_then(role_ref),
    }
  }

  /// Whether the candidate's id passes [`is_uuid_like`].
  pub fn has_valid_id(&self) -> bool {
    self.affiliation_id.as_deref().is_some_and(is_uuid_like)
  }

  /// The denormalized snapshot stored on the identity.
  pub fn snapshot(&self) -> Affiliation {
    let raw = &self.affiliation_snapshot;
    Affiliation {
      id:        string_at(raw, "id"),
      name:      first_string_at(raw, &["name", "dealershipName"]),
      code:      self.affiliation_code.clone(),
      is_active: self.is_active,
    }
  }

  /// Whether `self` displaces `best` under the precedence rule: primary
  /// first, then id validity, then the dealership's own active flag.
  fn beats(&self, best: &Self) -> bool {
    if self.is_primary != best.is_primary {
      return self.is_primary;
    }
    let (mine, theirs) = (self.has_valid_id(), best.has_valid_id());
    if mine != theirs {
      return mine;
    }
    self.is_active && !best.is_active
  }
}

// ─── Collection and selection ────────────────────────────────────────────────

/// Scan `profile` for every dealership mention, in precedence order.
pub fn collect_candidates(profile: &Object) -> Vec<AffiliationCandidate> {
  let singles = SINGLE_SOURCES
    .iter()
    .filter_map(|aliases| first_object_at(profile, aliases));

  let listed = LIST_SOURCES
    .iter()
    .filter_map(|aliases| {
      aliases
        .iter()
        .find_map(|k| profile.get(*k).and_then(Value::as_array))
    })
    .flatten()
    .filter_map(Value::as_object);

  singles
    .chain(listed)
    .map(AffiliationCandidate::from_entry)
    .collect()
}

/// Reduce candidates to the authoritative one. Ties keep the first seen.
pub fn select_winner<I>(candidates: I) -> Option<AffiliationCandidate>
where
  I: IntoIterator<Item = AffiliationCandidate>,
{
  candidates
    .into_iter()
    .reduce(|best, challenger| if challenger.beats(&best) { challenger } else { best })
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  const UUID_A: &str = "123e4567-e89b-12d3-a456-426614174000";
  const UUID_B: &str = "9b2f3c1e-4d5a-4e6f-8a7b-0c1d2e3f4a5b";

  fn candidate(id: &str, primary: bool, active: bool) -> AffiliationCandidate {
    AffiliationCandidate {
      affiliation_id: Some(id.to_owned()),
      is_primary: primary,
      is_active: active,
      ..Default::default()
    }
  }

  fn object(value: serde_json::Value) -> Object {
    value.as_object().cloned().unwrap()
  }

  // ── Precedence ────────────────────────────────────────────────────────────

  #[test]
  fn primary_flag_dominates_id_validity() {
    let winner = select_winner([
      candidate(UUID_A, false, true),
      candidate("abc", true, false),
    ])
    .unwrap();
    assert_eq!(winner.affiliation_id.as_deref(), Some("abc"));

    // Order does not matter.
    let winner = select_winner([
      candidate("abc", true, false),
      candidate(UUID_A, false, true),
    ])
    .unwrap();
    assert_eq!(winner.affiliation_id.as_deref(), Some("abc"));
  }

  #[test]
  fn valid_id_wins_among_equally_primary() {
    let winner = select_winner([
      candidate("abc", true, true),
      candidate(UUID_A, true, false),
    ])
    .unwrap();
    assert_eq!(winner.affiliation_id.as_deref(), Some(UUID_A));
  }

  #[test]
  fn active_breaks_remaining_ties() {
    let winner = select_winner([
      candidate(UUID_A, false, false),
      candidate(UUID_B, false, true),
    ])
    .unwrap();
    assert_eq!(winner.affiliation_id.as_deref(), Some(UUID_B));
  }

  #[test]
  fn first_seen_wins_full_ties() {
    let winner = select_winner([
      candidate(UUID_A, true, true),
      candidate(UUID_B, true, true),
    ])
    .unwrap();
    assert_eq!(winner.affiliation_id.as_deref(), Some(UUID_A));
  }

  #[test]
  fn no_candidates_no_winner() {
    assert_eq!(select_winner(Vec::new()), None);
  }

  // ── Entry parsing ─────────────────────────────────────────────────────────

  #[test]
  fn nested_dealership_is_found_under_alternate_keys() {
    for key in NESTED_KEYS {
      let entry = object(json!({
        "id": "membership-row",
        key: { "id": UUID_A, "code": "NSM", "name": "Northside" },
      }));
      let c = AffiliationCandidate::from_entry(&entry);
      assert_eq!(c.affiliation_id.as_deref(), Some(UUID_A), "key {key}");
      assert_eq!(c.affiliation_code.as_deref(), Some("NSM"));
      assert_eq!(c.snapshot().name.as_deref(), Some("Northside"));
    }
  }

  #[test]
  fn entry_dealership_id_takes_precedence_over_nested_id() {
    let entry = object(json!({
      "dealershipId": UUID_B,
      "dealership": { "id": UUID_A },
    }));
    let c = AffiliationCandidate::from_entry(&entry);
    assert_eq!(c.affiliation_id.as_deref(), Some(UUID_B));
    assert_eq!(c.snapshot().id.as_deref(), Some(UUID_A));
  }

  #[test]
  fn primary_flag_spellings() {
    for flag in ENTRY_PRIMARY_FLAGS {
      let c = AffiliationCandidate::from_entry(&object(json!({ flag: true })));
      assert!(c.is_primary, "entry flag {flag}");
    }
    for flag in NESTED_PRIMARY_FLAGS {
      let c = AffiliationCandidate::from_entry(&object(
        json!({ "dealership": { flag: "true" } }),
      ));
      assert!(c.is_primary, "nested flag {flag}");
    }
    let c = AffiliationCandidate::from_entry(&object(
      json!({ "isPrimary": false, "dealership": { "primary": true } }),
    ));
    assert!(!c.is_primary);
  }

  #[test]
  fn employee_and_role_come_from_the_entry() {
    let entry = object(json!({
      "employee": { "id": 1207 },
      "role": "TEAM_LEAD",
      "dealership": { "id": UUID_A, "isActive": true },
    }));
    let c = AffiliationCandidate::from_entry(&entry);
    assert_eq!(c.employee_reference.as_deref(), Some("1207"));
    assert_eq!(c.role, Some(RoleRef::from_name("TEAM_LEAD")));
    assert!(c.is_active);
  }

  #[test]
  fn collection_follows_source_order() {
    let profile = object(json!({
      "memberships": [{ "dealershipId": "m1" }],
      "assignments": [{ "dealershipId": "a1" }, null, { "dealershipId": "a2" }],
      "dealerships": [{ "id": "l1" }],
      "activeDealership": { "id": "active" },
      "primaryAffiliation": { "id": "primary" },
      "dealership": { "id": "single" },
    }));
    let ids: Vec<_> = collect_candidates(&profile)
      .into_iter()
      .map(|c| c.affiliation_id.unwrap())
      .collect();
    assert_eq!(
      ids,
      ["single", "primary", "active", "l1", "a1", "a2", "m1"]
    );
  }

  #[test]
  fn non_list_sources_are_ignored() {
    let profile = object(json!({ "dealerships": { "id": "x" }, "dealership": null }));
    assert!(collect_candidates(&profile).is_empty());
  }
}
