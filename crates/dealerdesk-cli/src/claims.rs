//! Reading the subject out of an identity-provider access token.
//!
//! The token was issued and is verified by the provider; this only reads its
//! payload so the session can be pinned to the right subject.

use anyhow::{Context, Result, anyhow};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use dealerdesk_core::ProviderClaims;
use serde::Deserialize;

#[derive(Deserialize)]
struct JwtPayload {
  sub:   String,
  #[serde(default)]
  email: Option<String>,
}

/// Decode the `sub` and `email` claims of a JWT without verifying it.
pub fn provider_claims(token: &str) -> Result<ProviderClaims> {
  let payload = token
    .split('.')
    .nth(1)
    .ok_or_else(|| anyhow!("access token is not a JWT"))?;
  let bytes = B64
    .decode(payload.trim_end_matches('='))
    .context("decoding access token payload")?;
  let claims: JwtPayload =
    serde_json::from_slice(&bytes).context("parsing access token claims")?;

  Ok(ProviderClaims { subject_id: claims.sub, email: claims.email })
}
