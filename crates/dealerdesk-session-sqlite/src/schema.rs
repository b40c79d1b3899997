//! SQL schema for the session cache.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Plain key/value store. The identity crate only ever uses one key.
CREATE TABLE IF NOT EXISTS session_cache (
    cache_key  TEXT PRIMARY KEY,
    value_json TEXT NOT NULL,   -- camelCase Identity JSON
    stored_at  TEXT NOT NULL    -- ISO 8601 UTC
);

PRAGMA user_version = 1;
";

/// The key the current identity lives under.
pub const IDENTITY_KEY: &str = "current_identity";
