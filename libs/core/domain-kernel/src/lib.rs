//! Domain kernel
//!
//! Building blocks shared by every aggregate in the workspace:
//!
//! - [`AuditInfo`]: immutable creation/update stamp
//! - [`EventBuffer`]: ordered buffer of pending domain events, drained by
//!   the application service after a successful save
//! - [`validation`]: field checks used by the aggregates' `validate_*`
//!   functions
//!
//! # Unit of work
//!
//! ```text
//! load ──▶ one mutating call ──▶ save ──▶ drain buffer ──▶ publish (best-effort)
//! ```
//!
//! Aggregates perform no I/O; the buffer is never cleared implicitly.

pub mod audit;
pub mod events;
pub mod validation;

pub use audit::AuditInfo;
pub use events::EventBuffer;
pub use validation::{FieldError, require_actor, require_max_len, require_text};
