//! The dealership directory collaborator.
//!
//! A paged search-by-text endpoint. Only affiliation enrichment consults it.

use std::future::Future;

use serde::{Deserialize, Deserializer, Serialize, de};

// ─── Records ─────────────────────────────────────────────────────────────────

/// A single directory search result. Unknown fields are ignored.
///
/// `id` is required and may arrive as a string or a number; a record without
/// a usable id does not deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealershipRecord {
  #[serde(deserialize_with = "record_id")]
  pub id:        String,
  #[serde(default)]
  pub code:      Option<String>,
  #[serde(default)]
  pub name:      Option<String>,
  #[serde(default)]
  pub is_active: bool,
}

fn record_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum RawId {
    Text(String),
    Number(serde_json::Number),
  }

  let id = match RawId::deserialize(deserializer)? {
    RawId::Text(text) => text,
    RawId::Number(n) => n.to_string(),
  };
  if id.trim().is_empty() {
    return Err(de::Error::custom("dealership id is blank"));
  }
  Ok(id)
}

/// Parameters for [`DealershipDirectory::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryQuery {
  /// Free-text filter; `None` lists the first page unfiltered.
  pub text:  Option<String>,
  pub limit: usize,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the backend's dealership search.
pub trait DealershipDirectory: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return up to `query.limit` dealerships matching `query.text`.
  fn search<'a>(
    &'a self,
    query: &'a DirectoryQuery,
  ) -> impl Future<Output = Result<Vec<DealershipRecord>, Self::Error>> + Send + 'a;
}
