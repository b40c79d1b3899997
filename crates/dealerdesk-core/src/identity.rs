//! The canonical session identity.
//!
//! An [`Identity`] only ever comes out of the profile normalizer. Nothing
//! downstream inspects the raw backend payload it was built from.

use serde::{Deserialize, Serialize};

use crate::{Result, role::Role};

/// Placeholder role id used when the backend sends the role as a bare string.
pub const UNKNOWN_ROLE_ID: &str = "unknown";

// ─── Role reference ──────────────────────────────────────────────────────────

/// The role as the backend describes it: an opaque id plus a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
  pub id:   String,
  pub name: String,
}

impl RoleRef {
  /// Wrap a bare role string, e.g. `"CUSTOMER_ADVISOR"`.
  pub fn from_name(name: impl Into<String>) -> Self {
    Self { id: UNKNOWN_ROLE_ID.to_owned(), name: name.into() }
  }

  /// The hierarchy level named by this reference, or `None` when the name
  /// is not one of the five fixed roles.
  pub fn level(&self) -> Option<Role> { Role::from_label(&self.name).ok() }
}

// ─── Affiliation ─────────────────────────────────────────────────────────────

/// Denormalized snapshot of the dealership a subject is attached to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Affiliation {
  pub id:        Option<String>,
  pub name:      Option<String>,
  pub code:      Option<String>,
  pub is_active: bool,
}

// ─── Provider claims ─────────────────────────────────────────────────────────

/// What the external identity provider says about the signed-in subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderClaims {
  pub subject_id: String,
  pub email:      Option<String>,
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// The fully normalized, validated session record.
///
/// Serializes with camelCase keys; that form is what the session cache
/// stores, and feeding it back through the normalizer yields an equal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
  /// Stable identifier issued by the external identity provider. The
  /// normalizer leaves it empty when the payload carries none; session
  /// establishment backfills it from the provider and refuses to proceed
  /// without one.
  pub subject_id:             Option<String>,
  pub email:                  Option<String>,
  pub display_name:           Option<String>,
  pub role:                   RoleRef,
  pub primary_affiliation_id: Option<String>,
  /// Kept in sync with `primary_affiliation_id`: when both are present the
  /// snapshot's `id` equals it.
  pub primary_affiliation:    Option<Affiliation>,
  pub affiliation_code:       Option<String>,
  /// Internal employee number; unrelated to `subject_id`.
  pub employee_reference:     Option<String>,
  pub active:                 bool,
}

impl Identity {
  /// Parse `role.name` into the fixed hierarchy. `None` is the explicit
  /// "unknown role" sentinel; callers decide how to present it.
  pub fn role_level(&self) -> Option<Role> { self.role.level() }

  /// Fill `subject_id` and `email` from identity-provider claims.
  ///
  /// The provider is authoritative for the subject; the payload's email is
  /// kept when the provider has none.
  pub fn with_provider_claims(mut self, claims: &ProviderClaims) -> Self {
    self.subject_id = Some(claims.subject_id.clone());
    if claims.email.is_some() {
      self.email = claims.email.clone();
    }
    self
  }

  /// The JSON blob handed to the session cache.
  pub fn to_cache_payload(&self) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(self)?)
  }
}
