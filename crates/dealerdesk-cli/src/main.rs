//! `dealerdesk`: establish and inspect a DealerDesk session.
//!
//! # Usage
//!
//! ```text
//! dealerdesk --token "$ACCESS_TOKEN" session
//! dealerdesk normalize --file profile.json
//! dealerdesk logout
//! ```

mod claims;
mod client;
mod settings;
mod summary;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use dealerdesk_core::session::SessionCache as _;
use dealerdesk_identity::{
  NormalizeError, Session, SessionBootstrap, SessionError, SessionSource, normalize,
};
use dealerdesk_session_sqlite::SqliteSessionCache;
use settings::{CliConfig, expand_tilde};
use summary::Report;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const NOT_PROVISIONED: &str =
  "this account is not provisioned correctly; contact your administrator";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Establish and inspect a DealerDesk session")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "dealerdesk.toml")]
  config: PathBuf,

  /// Base URL of the backend API.
  #[arg(long, env = "DEALERDESK_URL")]
  url: Option<String>,

  /// Identity-provider access token.
  #[arg(long, env = "DEALERDESK_TOKEN")]
  token: Option<String>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Restore the cached session, or establish a fresh one (default).
  Session,
  /// Ignore the cache and establish a fresh session.
  Refresh,
  /// Forget the cached session.
  Logout,
  /// Normalize a profile payload from a file, without touching the network.
  Normalize {
    #[arg(short, long)]
    file: PathBuf,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let mut cfg = CliConfig::load(&cli.config)?;
  if let Some(url) = cli.url {
    cfg.base_url = url;
  }
  if cli.token.is_some() {
    cfg.token = cli.token;
  }

  match cli.command.unwrap_or(Command::Session) {
    Command::Normalize { file } => normalize_file(&file),
    Command::Logout => {
      open_cache(&cfg).await?.clear().await.context("clearing session cache")?;
      tracing::info!("session cache cleared");
      Ok(())
    }
    Command::Session => run_session(&cfg, false).await,
    Command::Refresh => run_session(&cfg, true).await,
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn open_cache(cfg: &CliConfig) -> Result<SqliteSessionCache> {
  let path = expand_tilde(&cfg.cache_path);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("creating cache directory {}", parent.display()))?;
  }
  SqliteSessionCache::open(&path)
    .await
    .with_context(|| format!("failed to open session cache at {path:?}"))
}

async fn run_session(cfg: &CliConfig, refresh: bool) -> Result<()> {
  let api = ApiClient::new(ApiConfig {
    base_url: cfg.base_url.clone(),
    token:    cfg.token.clone(),
    timeout:  cfg.timeout(),
  })?;
  let cache = open_cache(cfg).await?;

  let mut bootstrap = SessionBootstrap::new(&api, &api, &cache);
  if let Some(token) = &cfg.token {
    match claims::provider_claims(token) {
      Ok(claims) => bootstrap = bootstrap.with_claims(claims),
      Err(e) => tracing::debug!(error = %e, "token carries no readable claims"),
    }
  }

  let result = if refresh {
    bootstrap.establish().await
  } else {
    bootstrap.restore_or_establish().await
  };

  let Session { identity, source } = match result {
    Ok(session) => session,
    Err(SessionError::Normalize(e)) => return Err(not_provisioned(e)),
    Err(SessionError::Profile(e)) => {
      return Err(e).context("fetching the user profile");
    }
  };

  let source = match source {
    SessionSource::Cached => "cached",
    SessionSource::Fresh => "fresh",
  };
  print_report(&Report::new(&identity, Some(source)))
}

fn normalize_file(file: &Path) -> Result<()> {
  let raw = std::fs::read_to_string(file)
    .with_context(|| format!("reading profile payload {}", file.display()))?;
  let payload: serde_json::Value =
    serde_json::from_str(&raw).context("parsing profile payload")?;
  let identity = normalize(&payload).map_err(not_provisioned)?;
  print_report(&Report::new(&identity, None))
}

fn not_provisioned(e: NormalizeError) -> anyhow::Error {
  tracing::error!(error = %e, "profile rejected");
  anyhow::Error::new(e).context(NOT_PROVISIONED)
}

fn print_report(report: &Report<'_>) -> Result<()> {
  let out = serde_json::to_string_pretty(report).context("serialising report")?;
  println!("{out}");
  Ok(())
}
