//! Summary Store - persistent record of summaries, users, and analytics
//!
//! ## Responsibilities
//!
//! - Own the SQLite schema (auto-created on startup)
//! - Create/read/search/delete summaries, scoped by user identifier
//! - Per-user aggregate statistics
//!
//! Records are immutable after creation: there is no update path, only
//! create and delete.

mod repository;
mod types;

pub use repository::SummaryStore;
pub use types::{NewSummary, SummaryRecord, UserStats};
