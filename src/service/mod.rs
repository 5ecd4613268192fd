//! Application Service - the "summarize and persist" use case
//!
//! ## Flow
//! 1. Extract plain text (when the input is a file)
//! 2. Summarize via the provider client
//! 3. Persist the summary and its analytics event
//!
//! The store write happens only after a successful summarization; that
//! ordering is the system's only atomicity guarantee. No summary row ever
//! exists without a prior successful summarization result.
//!
//! Read-side operations (history, search, statistics, recent, delete) pass
//! through to the store after input validation.

use crate::error::{Error, Result};
use crate::extractor::{self, DocumentFormat};
use crate::store::{NewSummary, SummaryRecord, SummaryStore, UserStats};
use crate::summarizer::{SummarizerClient, SummaryOutput, SummaryStyle};
use std::sync::Arc;
use tracing::info;

/// Default document name for pasted text
const PASTED_TEXT_NAME: &str = "Pasted text";

/// Input to `summarize_and_save`: either pasted text or an uploaded file.
#[derive(Debug, Clone)]
pub enum InputSource {
    Text(String),
    File {
        name: String,
        format: DocumentFormat,
        bytes: Vec<u8>,
    },
}

/// Application service composing extractor, summarizer client, and store
pub struct AppService {
    summarizer: Arc<SummarizerClient>,
    store: SummaryStore,
}

impl AppService {
    pub fn new(summarizer: Arc<SummarizerClient>, store: SummaryStore) -> Self {
        Self { summarizer, store }
    }

    /// Extract (if needed) and summarize without persisting anything.
    pub async fn summarize(
        &self,
        source: InputSource,
        style: SummaryStyle,
    ) -> Result<SummaryOutput> {
        let (text, _, _, _) = resolve_source(source)?;
        self.summarizer.summarize(&text, style).await
    }

    /// Extract (if needed), summarize, and persist.
    pub async fn summarize_and_save(
        &self,
        user_id: &str,
        source: InputSource,
        style: SummaryStyle,
    ) -> Result<SummaryRecord> {
        validate_user_id(user_id)?;

        // 1. Resolve the input to plain text plus document metadata
        let (text, document_name, document_type, file_size) = resolve_source(source)?;

        info!(
            user_id = %user_id,
            document_name = %document_name,
            document_type = %document_type,
            style = %style,
            "Summarization requested"
        );

        // 2. Summarize; any failure here leaves the store untouched
        let output = self.summarizer.summarize(&text, style).await?;

        // 3. Persist summary + analytics event
        self.store
            .create(NewSummary {
                user_id: user_id.to_string(),
                document_name,
                document_type,
                style,
                summary: output.text,
                input_word_count: output.input_words,
                output_word_count: output.output_words,
                processing_seconds: output.duration.as_secs_f64(),
                quality_score: output.quality_score,
                file_size,
            })
            .await
    }

    /// A user's summaries, newest first, offset-paginated.
    pub async fn history(
        &self,
        user_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<SummaryRecord>> {
        validate_user_id(user_id)?;
        if page == 0 {
            return Err(Error::Validation("page must be >= 1".to_string()));
        }
        if !(1..=100).contains(&page_size) {
            return Err(Error::Validation(
                "page_size must be between 1 and 100".to_string(),
            ));
        }
        self.store.list(user_id, page, page_size).await
    }

    /// One summary by id, under the ownership rule.
    pub async fn get(&self, user_id: &str, summary_id: i64) -> Result<SummaryRecord> {
        validate_user_id(user_id)?;
        validate_summary_id(summary_id)?;
        self.store.get(user_id, summary_id).await
    }

    /// Case-insensitive substring search.
    pub async fn search(&self, user_id: &str, query: &str) -> Result<Vec<SummaryRecord>> {
        validate_user_id(user_id)?;
        if query.trim().is_empty() {
            return Err(Error::Validation("query must not be empty".to_string()));
        }
        self.store.search(user_id, query.trim()).await
    }

    /// Summaries from the last `days` days.
    pub async fn recent(&self, user_id: &str, days: u32) -> Result<Vec<SummaryRecord>> {
        validate_user_id(user_id)?;
        if !(1..=365).contains(&days) {
            return Err(Error::Validation(
                "days must be between 1 and 365".to_string(),
            ));
        }
        self.store.recent(user_id, days).await
    }

    /// Aggregate statistics; zeroed for unknown users.
    pub async fn stats(&self, user_id: &str) -> Result<UserStats> {
        validate_user_id(user_id)?;
        self.store.statistics(user_id).await
    }

    /// Delete one summary. A second delete of the same id reports `NotFound`.
    pub async fn delete(&self, user_id: &str, summary_id: i64) -> Result<()> {
        validate_user_id(user_id)?;
        validate_summary_id(summary_id)?;
        self.store.delete(user_id, summary_id).await
    }
}

/// Turn an input source into plain text plus document metadata.
fn resolve_source(source: InputSource) -> Result<(String, String, String, Option<i64>)> {
    match source {
        InputSource::Text(text) => Ok((
            text,
            PASTED_TEXT_NAME.to_string(),
            "text".to_string(),
            None,
        )),
        InputSource::File {
            name,
            format,
            bytes,
        } => {
            let size = bytes.len() as i64;
            let text = extractor::extract(&bytes, format)?;
            Ok((text, name, format.to_string(), Some(size)))
        }
    }
}

fn validate_user_id(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(Error::Validation("user_id must not be empty".to_string()));
    }
    Ok(())
}

fn validate_summary_id(summary_id: i64) -> Result<()> {
    if summary_id <= 0 {
        return Err(Error::Validation(
            "summary id must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_validation() {
        assert!(validate_user_id("alice").is_ok());
        assert!(matches!(
            validate_user_id("   "),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn summary_id_validation() {
        assert!(validate_summary_id(1).is_ok());
        assert!(matches!(validate_summary_id(0), Err(Error::Validation(_))));
        assert!(matches!(validate_summary_id(-5), Err(Error::Validation(_))));
    }
}
