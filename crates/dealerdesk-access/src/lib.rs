//! Role-based access resolution for DealerDesk.
//!
//! Every function here is pure: no I/O, no state, no panics. They are safe
//! to call from any thread without synchronization. Callers holding an
//! identity whose role is outside the fixed hierarchy
//! ([`Identity::role_level`](dealerdesk_core::Identity::role_level) returned
//! `None`) must decide for themselves what to show; nothing here guesses.

pub mod hierarchy;
pub mod remarks;
pub mod visibility;

pub use hierarchy::{can_manage, can_view, manageable_roles, rank};
pub use remarks::{
  can_cancel_remark, readable_remark_fields, writable_remark_field,
  writable_remark_fields,
};
pub use visibility::{
  VisibilityScope, filter_by_visibility, visibility_scope, visible_subject_ids,
};
