//! Session collaborators: the profile endpoint and the session cache.
//!
//! Both are implemented outside this crate (`dealerdesk-cli` and
//! `dealerdesk-session-sqlite`); the identity crate drives them.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::identity::Identity;

/// A cached identity blob as read back from storage.
///
/// The payload is untrusted: it goes through normalization again before use.
#[derive(Debug, Clone)]
pub struct CachedSession {
  pub payload:   serde_json::Value,
  pub stored_at: DateTime<Utc>,
}

/// The backend endpoint returning the signed-in user's raw profile.
pub trait ProfileSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn fetch_profile(
    &self,
  ) -> impl Future<Output = Result<serde_json::Value, Self::Error>> + Send + '_;
}

/// Key-value persistence for the current session identity.
pub trait SessionCache: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The previously stored identity blob, if any.
  fn load(
    &self,
  ) -> impl Future<Output = Result<Option<CachedSession>, Self::Error>> + Send + '_;

  /// Replace the stored identity.
  fn save<'a>(
    &'a self,
    identity: &'a Identity,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Forget the stored identity. Clearing an empty cache is not an error.
  fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
