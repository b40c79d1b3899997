//! Lookups over untyped JSON profile payloads.
//!
//! Backends send ids as strings or numbers and flags as whatever the author
//! of that endpoint preferred; these helpers flatten that variety.

use dealerdesk_core::RoleRef;
use serde_json::Value;

pub type Object = serde_json::Map<String, Value>;

/// Loose truthiness for flag fields.
///
/// `null`, `false`, `0`, and the empty string are false. Everything else,
/// including the string `"false"` and empty objects, is true.
pub(crate) fn truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

/// Whether any of `keys` holds a truthy value on `obj`.
pub(crate) fn any_flag(obj: &Object, keys: &[&str]) -> bool {
  keys.iter().any(|k| obj.get(*k).is_some_and(truthy))
}

/// A non-empty string or a number, rendered as a string.
pub(crate) fn scalar(value: &Value) -> Option<String> {
  match value {
    Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

pub(crate) fn string_at(obj: &Object, key: &str) -> Option<String> {
  obj.get(key).and_then(scalar)
}

/// The first of `keys` that yields a usable string.
pub(crate) fn first_string_at(obj: &Object, keys: &[&str]) -> Option<String> {
  keys.iter().find_map(|k| string_at(obj, k))
}

pub(crate) fn object_at<'a>(obj: &'a Object, key: &str) -> Option<&'a Object> {
  obj.get(key).and_then(Value::as_object)
}

/// The first of `keys` holding an object.
pub(crate) fn first_object_at<'a>(
  obj: &'a Object,
  keys: &[&str],
) -> Option<&'a Object> {
  keys.iter().find_map(|k| object_at(obj, k))
}

/// Read a role in either shape the backend uses: a bare name, or an object
/// with `id` and `name`. `null` reads as absent.
///
/// An object without a usable `name` still yields a reference (with an empty
/// name) so that final validation reports it as invalid rather than missing.
pub(crate) fn role_ref(value: &Value) -> Option<RoleRef> {
  match value {
    Value::Null => None,
    Value::String(name) => Some(RoleRef::from_name(name.clone())),
    Value::Object(obj) => Some(RoleRef {
      id:   string_at(obj, "id")
        .unwrap_or_else(|| dealerdesk_core::identity::UNKNOWN_ROLE_ID.to_owned()),
      name: string_at(obj, "name").unwrap_or_default(),
    }),
    _ => Some(RoleRef::from_name(String::new())),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn truthiness_matches_backend_flags() {
    let truthy_values =
      [json!(true), json!(1), json!("yes"), json!("false"), json!("0"), json!({}), json!([])];
    for v in truthy_values {
      assert!(truthy(&v), "{v} should be truthy");
    }
    for v in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
      assert!(!truthy(&v), "{v} should be falsy");
    }
  }

  #[test]
  fn numeric_ids_are_stringified() {
    let obj = json!({ "id": 42, "blank": "  " });
    let obj = obj.as_object().unwrap();
    assert_eq!(string_at(obj, "id").as_deref(), Some("42"));
    assert_eq!(string_at(obj, "blank"), None);
  }

  #[test]
  fn role_shapes() {
    assert_eq!(role_ref(&json!(null)), None);
    assert_eq!(
      role_ref(&json!("TEAM_LEAD")),
      Some(RoleRef::from_name("TEAM_LEAD"))
    );
    assert_eq!(
      role_ref(&json!({ "id": 7, "name": "ADMIN" })),
      Some(RoleRef { id: "7".into(), name: "ADMIN".into() })
    );
    let nameless = role_ref(&json!({ "id": "r1" })).unwrap();
    assert!(nameless.name.is_empty());
  }
}
