//! Core types and collaborator traits for DealerDesk identity and access
//! resolution.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Every other crate depends on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod directory;
pub mod error;
pub mod identity;
pub mod remark;
pub mod role;
pub mod session;
pub mod team;

pub use error::{Error, Result};
pub use identity::{Affiliation, Identity, ProviderClaims, RoleRef};
pub use role::Role;
