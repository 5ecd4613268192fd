//! Summary Store type definitions

use crate::summarizer::SummaryStyle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted summarization result.
///
/// Content fields are immutable after creation: the store only ever creates
/// and deletes these records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub id: i64,
    pub user_id: String,
    pub document_name: String,
    pub document_type: String,
    pub style: SummaryStyle,
    pub summary: String,
    pub input_word_count: i64,
    pub output_word_count: i64,
    pub processing_seconds: f64,
    pub quality_score: f64,
    pub file_size: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new summary (and its analytics event)
#[derive(Debug, Clone)]
pub struct NewSummary {
    pub user_id: String,
    pub document_name: String,
    pub document_type: String,
    pub style: SummaryStyle,
    pub summary: String,
    pub input_word_count: i64,
    pub output_word_count: i64,
    pub processing_seconds: f64,
    pub quality_score: f64,
    pub file_size: Option<i64>,
}

/// Per-user aggregate statistics.
///
/// All fields are zero (and `favorite_style` is `None`) for a user with no
/// summaries; that is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub count: i64,
    pub total_words_summarized: i64,
    pub average_quality: f64,
    pub average_duration_seconds: f64,
    pub favorite_style: Option<String>,
}

impl UserStats {
    pub fn zeroed() -> Self {
        Self {
            count: 0,
            total_words_summarized: 0,
            average_quality: 0.0,
            average_duration_seconds: 0.0,
            favorite_style: None,
        }
    }
}
