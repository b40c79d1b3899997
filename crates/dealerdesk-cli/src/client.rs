//! Async HTTP client for the DealerDesk backend.
//!
//! Implements the two collaborators the identity layer needs: the profile
//! endpoint ([`ProfileSource`]) and the dealership search
//! ([`DealershipDirectory`]).

use std::time::Duration;

use dealerdesk_core::{
  directory::{DealershipDirectory, DealershipRecord, DirectoryQuery},
  session::ProfileSource,
};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

const PROFILE_PATH: &str = "/users/me";
const DIRECTORY_PATH: &str = "/dealerships";

/// Keys a paged response may wrap its list under.
const LIST_KEYS: [&str; 3] = ["data", "items", "dealerships"];

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("failed to build HTTP client: {0}")]
  Build(#[source] reqwest::Error),

  #[error("GET {path} failed: {source}")]
  Request {
    path:   &'static str,
    #[source]
    source: reqwest::Error,
  },

  #[error("GET {path} → {status}")]
  Status {
    path:   &'static str,
    status: StatusCode,
  },

  #[error("unexpected response shape from {0}")]
  Shape(&'static str),
}

/// Connection settings for the backend API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  /// Bearer token issued by the identity provider.
  pub token:    Option<String>,
  pub timeout:  Duration,
}

/// Async HTTP client for the backend REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(ClientError::Build)?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match &self.config.token {
      Some(token) => req.bearer_auth(token),
      None => req,
    }
  }

  async fn get_json(
    &self,
    path: &'static str,
    query: &[(&str, String)],
  ) -> Result<Value, ClientError> {
    let resp = self
      .auth(self.client.get(self.url(path)))
      .query(query)
      .send()
      .await
      .map_err(|source| ClientError::Request { path, source })?;

    let status = resp.status();
    if !status.is_success() {
      return Err(ClientError::Status { path, status });
    }
    resp
      .json()
      .await
      .map_err(|source| ClientError::Request { path, source })
  }
}

// ─── Collaborators ───────────────────────────────────────────────────────────

impl ProfileSource for ApiClient {
  type Error = ClientError;

  /// `GET /api/users/me`
  async fn fetch_profile(&self) -> Result<Value, ClientError> {
    self.get_json(PROFILE_PATH, &[]).await
  }
}

impl DealershipDirectory for ApiClient {
  type Error = ClientError;

  /// `GET /api/dealerships?limit=<n>[&search=<text>]`
  async fn search(&self, query: &DirectoryQuery) -> Result<Vec<DealershipRecord>, ClientError> {
    let mut params = vec![("limit", query.limit.to_string())];
    if let Some(text) = &query.text {
      params.push(("search", text.clone()));
    }
    let body = self.get_json(DIRECTORY_PATH, &params).await?;
    records_from(body)
  }
}

/// Pull dealership records out of either a bare array or an object wrapping
/// one. Entries that do not parse are skipped.
fn records_from(body: Value) -> Result<Vec<DealershipRecord>, ClientError> {
  let list = match body {
    Value::Array(list) => list,
    Value::Object(mut obj) => LIST_KEYS
      .iter()
      .find_map(|k| match obj.remove(*k) {
        Some(Value::Array(list)) => Some(list),
        _ => None,
      })
      .ok_or(ClientError::Shape(DIRECTORY_PATH))?,
    _ => return Err(ClientError::Shape(DIRECTORY_PATH)),
  };

  Ok(
    list
      .into_iter()
      .filter_map(|entry| match serde_json::from_value(entry) {
        Ok(record) => Some(record),
        Err(e) => {
          tracing::debug!(error = %e, "skipping unparseable dealership record");
          None
        }
      })
      .collect(),
  )
}
