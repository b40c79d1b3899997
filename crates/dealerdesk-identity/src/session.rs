//! Session establishment: cache, profile endpoint, normalize, enrich, cache.
//!
//! The resulting [`Identity`] is handed back to the caller as a plain value;
//! there is no process-wide "current user".

use dealerdesk_core::{
  Identity, ProviderClaims,
  directory::DealershipDirectory,
  session::{ProfileSource, SessionCache},
};

use crate::{
  enrich::resolve_affiliation_details,
  error::{NormalizeError, SessionError},
  normalize::normalize,
};

/// Where a session's identity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
  Cached,
  Fresh,
}

/// An established session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
  pub identity: Identity,
  pub source:   SessionSource,
}

/// Drives the collaborators needed to establish a session.
///
/// Callers serialize establishment; one bootstrap never enriches the same
/// identity concurrently.
pub struct SessionBootstrap<'a, P, D, C> {
  profiles:  &'a P,
  directory: &'a D,
  cache:     &'a C,
  claims:    Option<ProviderClaims>,
}

impl<'a, P, D, C> SessionBootstrap<'a, P, D, C>
where
  P: ProfileSource,
  D: DealershipDirectory,
  C: SessionCache,
{
  pub fn new(profiles: &'a P, directory: &'a D, cache: &'a C) -> Self {
    Self { profiles, directory, cache, claims: None }
  }

  /// Attach the identity provider's claims for the signed-in subject.
  pub fn with_claims(mut self, claims: ProviderClaims) -> Self {
    self.claims = Some(claims);
    self
  }

  /// Re-validate the cached identity, if there is one.
  ///
  /// A blob that cannot be read back, no longer normalizes, lacks a subject,
  /// or belongs to a different subject than the provider reports is
  /// discarded.
  pub async fn restore(&self) -> Option<Identity> {
    let cached = match self.cache.load().await {
      Ok(Some(cached)) => cached,
      Ok(None) => return None,
      Err(e) => {
        tracing::warn!(error = %e, "session cache unreadable; discarding");
        self.discard().await;
        return None;
      }
    };

    match self.revalidate(&cached.payload) {
      Ok(identity) => Some(identity),
      Err(e) => {
        tracing::warn!(error = %e, stored_at = %cached.stored_at, "discarding cached session");
        self.discard().await;
        None
      }
    }
  }

  fn revalidate(&self, payload: &serde_json::Value) -> Result<Identity, NormalizeError> {
    let identity = normalize(payload)?;
    if let (Some(claims), Some(subject)) = (&self.claims, &identity.subject_id)
      && &claims.subject_id != subject
    {
      return Err(NormalizeError::InvalidProfile(
        "cached session belongs to another subject".into(),
      ));
    }
    self.finish(identity)
  }

  /// Fetch, normalize, enrich, and cache a fresh identity.
  ///
  /// # Errors
  ///
  /// Profile fetch failures and every [`NormalizeError`] propagate. Enrichment
  /// and cache-write failures do not.
  pub async fn establish(&self) -> Result<Session, SessionError<P::Error>> {
    let raw = self
      .profiles
      .fetch_profile()
      .await
      .map_err(SessionError::Profile)?;

    let identity = self.finish(normalize(&raw)?)?;
    let identity = resolve_affiliation_details(identity, self.directory).await;

    if let Err(e) = self.cache.save(&identity).await {
      tracing::warn!(error = %e, "failed to cache session identity");
    }

    Ok(Session { identity, source: SessionSource::Fresh })
  }

  /// The cached identity when it is still valid, otherwise a fresh one.
  pub async fn restore_or_establish(&self) -> Result<Session, SessionError<P::Error>> {
    if let Some(identity) = self.restore().await {
      return Ok(Session { identity, source: SessionSource::Cached });
    }
    self.establish().await
  }

  fn finish(&self, identity: Identity) -> Result<Identity, NormalizeError> {
    let identity = match &self.claims {
      Some(claims) => identity.with_provider_claims(claims),
      None => identity,
    };
    if identity.subject_id.is_none() {
      return Err(NormalizeError::InvalidProfile("no subject identifier".into()));
    }
    Ok(identity)
  }

  async fn discard(&self) {
    if let Err(e) = self.cache.clear().await {
      tracing::warn!(error = %e, "failed to clear session cache");
    }
  }
}
