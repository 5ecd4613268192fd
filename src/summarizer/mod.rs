//! Summarizer Client - external summarization provider adapter
//!
//! ## Responsibilities
//!
//! - Validate input text and requested style
//! - Build style-specific prompts and call the provider
//! - Measure wall-clock duration around the call
//! - Derive word counts and the heuristic quality score
//!
//! Failures are surfaced as `SummarizationFailed`; the caller decides
//! whether to retry. This client never retries on its own.

mod prompt;
mod quality;

pub use prompt::{build_prompt, preprocess};
pub use quality::quality_score;

use crate::error::{Error, Result};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tracing::info;

/// Summary style
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    Bullets,
    Abstract,
    Detailed,
}

impl std::fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullets => write!(f, "bullets"),
            Self::Abstract => write!(f, "abstract"),
            Self::Detailed => write!(f, "detailed"),
        }
    }
}

impl std::str::FromStr for SummaryStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            // "bullet" kept as an alias for clients of the previous API
            "bullets" | "bullet" => Ok(Self::Bullets),
            "abstract" => Ok(Self::Abstract),
            "detailed" => Ok(Self::Detailed),
            other => Err(Error::InvalidStyle(format!(
                "unknown style '{}', expected bullets, abstract, or detailed",
                other
            ))),
        }
    }
}

/// Result of a single summarization call
#[derive(Debug, Clone)]
pub struct SummaryOutput {
    /// Generated summary text
    pub text: String,
    /// Word count of the submitted text
    pub input_words: i64,
    /// Word count of the summary
    pub output_words: i64,
    /// Wall-clock time around the provider call
    pub duration: Duration,
    /// Heuristic adequacy score in [0, 1] (advisory only)
    pub quality_score: f64,
}

/// Summarization provider client
pub struct SummarizerClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl SummarizerClient {
    /// Create a new client with the default 120s timeout
    pub fn new(base_url: String, model: String, api_key: String) -> Self {
        Self::with_timeout(base_url, model, api_key, Duration::from_secs(120))
    }

    /// Create a new client with an explicit request timeout.
    ///
    /// Timeout expiry surfaces as `SummarizationFailed` like any other
    /// transport error.
    pub fn with_timeout(
        base_url: String,
        model: String,
        api_key: String,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url,
            model,
            api_key,
        }
    }

    /// Summarize `text` in the requested style.
    ///
    /// Empty or whitespace-only input fails with `EmptyInput` before any
    /// network traffic.
    pub async fn summarize(&self, text: &str, style: SummaryStyle) -> Result<SummaryOutput> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput("no text provided".to_string()));
        }

        let cleaned = preprocess(text);
        if cleaned.is_empty() {
            return Err(Error::EmptyInput(
                "text preprocessing left no content".to_string(),
            ));
        }

        let prompt = build_prompt(&cleaned, style);

        info!(
            style = %style,
            input_chars = cleaned.len(),
            "Requesting summary"
        );

        let started = Instant::now();
        let summary = self.generate(&prompt).await?;
        let duration = started.elapsed();

        let input_words = count_words(text) as i64;
        let output_words = count_words(&summary) as i64;
        let quality = quality_score(&cleaned, &summary, style);

        info!(
            style = %style,
            input_words,
            output_words,
            elapsed_ms = duration.as_millis() as u64,
            quality = quality,
            "Summary generated"
        );

        Ok(SummaryOutput {
            text: summary,
            input_words,
            output_words,
            duration,
            quality_score: quality,
        })
    }

    /// Single provider call; no retry.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": 0.3,
                "topP": 0.8,
                "topK": 40,
                "maxOutputTokens": 2048
            }
        });

        let resp = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                Error::SummarizationFailed(format!("provider request failed: {}", e))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            return Err(Error::SummarizationFailed(format!(
                "provider returned {}: {}",
                status, detail
            )));
        }

        let json: Value = resp.json().await.map_err(|e| {
            Error::SummarizationFailed(format!("failed to parse provider response: {}", e))
        })?;

        let text = json
            .get("candidates")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|c| c.pointer("/content/parts"))
            .and_then(|p| p.as_array())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                    .collect::<Vec<_>>()
                    .join("")
            })
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::SummarizationFailed(
                "no text in provider response".to_string(),
            ));
        }

        Ok(text)
    }
}

/// Whitespace-delimited word count
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
