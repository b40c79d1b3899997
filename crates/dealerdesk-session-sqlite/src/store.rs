//! [`SqliteSessionCache`]: the SQLite implementation of [`SessionCache`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use dealerdesk_core::{
  Identity,
  session::{CachedSession, SessionCache},
};

use crate::{
  Error, Result,
  schema::{IDENTITY_KEY, SCHEMA},
};

// ─── Encoding ────────────────────────────────────────────────────────────────

fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Cache ───────────────────────────────────────────────────────────────────

/// A session cache backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteSessionCache {
  conn: tokio_rusqlite::Connection,
}

impl SqliteSessionCache {
  /// Open (or create) a cache at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let cache = Self { conn };
    cache.init_schema().await?;
    Ok(cache)
  }

  /// Open an in-memory cache, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let cache = Self { conn };
    cache.init_schema().await?;
    Ok(cache)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Store an arbitrary blob under the identity key. Lets callers (and
  /// tests) seed the cache with payloads that did not come from [`save`].
  ///
  /// [`save`]: SessionCache::save
  pub async fn put_raw(&self, value_json: String) -> Result<()> {
    let stored_at = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO session_cache (cache_key, value_json, stored_at)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (cache_key)
           DO UPDATE SET value_json = excluded.value_json,
                         stored_at  = excluded.stored_at",
          rusqlite::params![IDENTITY_KEY, value_json, stored_at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── SessionCache impl ───────────────────────────────────────────────────────

impl SessionCache for SqliteSessionCache {
  type Error = Error;

  /// A row whose JSON no longer parses is reported as [`Error::Json`]; the
  /// caller is expected to [`clear`](SessionCache::clear) it.
  async fn load(&self) -> Result<Option<CachedSession>> {
    let row: Option<(String, String)> = self
      .conn
      .call(|conn| {
        let row = conn
          .query_row(
            "SELECT value_json, stored_at FROM session_cache WHERE cache_key = ?1",
            rusqlite::params![IDENTITY_KEY],
            |r| Ok((r.get(0)?, r.get(1)?)),
          )
          .optional()?;
        Ok(row)
      })
      .await?;

    let Some((value_json, stored_at)) = row else {
      return Ok(None);
    };

    Ok(Some(CachedSession {
      payload:   serde_json::from_str(&value_json)?,
      stored_at: decode_dt(&stored_at)?,
    }))
  }

  async fn save(&self, identity: &Identity) -> Result<()> {
    let value_json = identity.to_cache_payload()?.to_string();
    self.put_raw(value_json).await
  }

  async fn clear(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute(
          "DELETE FROM session_cache WHERE cache_key = ?1",
          rusqlite::params![IDENTITY_KEY],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
