//! Runtime configuration, layered from a TOML file and the environment.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use serde::Deserialize;

/// Settings for the `dealerdesk` binary, deserialised from `dealerdesk.toml`
/// and `DEALERDESK_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
  #[serde(default = "default_base_url")]
  pub base_url:     String,
  /// Identity-provider access token.
  #[serde(default)]
  pub token:        Option<String>,
  #[serde(default = "default_cache_path")]
  pub cache_path:   PathBuf,
  /// Per-request timeout for backend calls, directory lookups included.
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_base_url() -> String { "http://localhost:8080".to_string() }

fn default_cache_path() -> PathBuf { PathBuf::from("~/.cache/dealerdesk/session.db") }

fn default_timeout_secs() -> u64 { 30 }

impl CliConfig {
  /// Read `path` (if it exists), then overlay `DEALERDESK_*` variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("DEALERDESK"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise CliConfig")
  }

  pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
