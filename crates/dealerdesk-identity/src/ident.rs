//! The identifier-validity rule for dealership ids.

use uuid::{Uuid, Variant};

/// Shortest legacy id accepted by the relaxed rule.
const LEGACY_MIN_LEN: usize = 20;

/// Whether `id` looks like a real dealership identifier.
///
/// Accepts canonical hyphenated v1–v5 UUIDs. Also accepts any string with a
/// hyphen that is at least 20 characters long: older records carry
/// non-UUID ids of that shape and must keep resolving.
pub fn is_uuid_like(id: &str) -> bool {
  is_canonical_uuid(id) || (id.contains('-') && id.chars().count() >= LEGACY_MIN_LEN)
}

fn is_canonical_uuid(id: &str) -> bool {
  // 36 chars rules out the simple, braced, and urn forms `try_parse` accepts.
  if id.len() != 36 {
    return false;
  }
  Uuid::try_parse(id).is_ok_and(|uuid| {
    matches!(uuid.get_version_num(), 1..=5) && uuid.get_variant() == Variant::RFC4122
  })
}
