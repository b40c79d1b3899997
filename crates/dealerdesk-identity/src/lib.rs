//! Profile normalization for DealerDesk sessions.
//!
//! Turns whatever the backend's profile endpoint returns into one canonical
//! [`Identity`](dealerdesk_core::Identity), resolving conflicting dealership
//! affiliations on the way. Network-backed enrichment and session caching are
//! separate, explicit steps layered on top of the pure [`normalize`].

pub mod candidate;
pub mod enrich;
pub mod error;
pub mod ident;
pub mod normalize;
pub mod session;

mod payload;

pub use enrich::resolve_affiliation_details;
pub use error::{NormalizeError, SessionError};
pub use ident::is_uuid_like;
pub use normalize::normalize;
pub use session::{Session, SessionBootstrap, SessionSource};
