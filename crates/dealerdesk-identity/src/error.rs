//! Error types for `dealerdesk-identity`.

use thiserror::Error;

/// Why a profile payload could not become an identity.
///
/// Every variant means the user is not provisioned correctly. None of them
/// is retryable, and callers must not synthesize a fallback identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
  #[error("profile payload is not a JSON object")]
  MalformedPayload,

  #[error("profile carries no role")]
  MissingRole,

  #[error("invalid profile: {0}")]
  InvalidProfile(String),
}

impl NormalizeError {
  pub fn is_retryable(&self) -> bool { false }
}

/// Failure to establish a session.
#[derive(Debug, Error)]
pub enum SessionError<E>
where
  E: std::error::Error + 'static,
{
  #[error("profile could not be normalized: {0}")]
  Normalize(#[from] NormalizeError),

  #[error("profile fetch failed: {0}")]
  Profile(#[source] E),
}
