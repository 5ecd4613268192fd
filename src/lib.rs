//! Briefly - document summarization service
//!
//! ## Architecture (6 Components)
//!
//! 1. Extractor - plain-text extraction from uploaded documents
//! 2. Summarizer - external provider adapter with prompts and quality scoring
//! 3. SummaryStore - SQLite persistence for summaries, users, analytics
//! 4. AppService - the extract -> summarize -> store use case
//! 5. WebAPI - REST API endpoints
//! 6. Static UI - browser frontend served next to the API
//!
//! ## Design Principles
//!
//! - The store is only written after a successful summarization
//! - Records are immutable after creation (create and delete only)
//! - All read paths are scoped by user identifier

pub mod error;
pub mod extractor;
pub mod service;
pub mod state;
pub mod store;
pub mod summarizer;
pub mod web_api;

pub use error::{Error, Result};
pub use state::{AppConfig, AppState};
