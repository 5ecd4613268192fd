//! API Routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{Error, Result};
use crate::extractor::DocumentFormat;
use crate::service::InputSource;
use crate::state::AppState;
use crate::store::SummaryRecord;
use crate::summarizer::SummaryStyle;

/// Create API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(super::health_check))
        // Summarization
        .route("/summarize", post(summarize))
        .route("/summarize-with-db", post(summarize_with_db))
        .route("/styles", get(list_styles))
        // Per-user history
        .route("/user/:user_id/summaries", get(list_summaries))
        .route("/user/:user_id/summary/:summary_id", get(get_summary))
        .route("/user/:user_id/summary/:summary_id", delete(delete_summary))
        .route("/user/:user_id/statistics", get(user_statistics))
        .route("/user/:user_id/search", get(search_summaries))
        .route("/user/:user_id/recent", get(recent_summaries))
        .with_state(state)
}

// ========================================
// Request/Response Types
// ========================================

/// Uploaded document payload (base64-encoded bytes)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpload {
    pub name: String,
    pub declared_type: String,
    pub content_base64: String,
}

/// Summarization request: exactly one of `text` or `document`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    pub user_id: String,
    pub style: String,
    pub text: Option<String>,
    pub document: Option<DocumentUpload>,
}

/// Stateless summarization request (nothing is persisted)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatelessSummarizeRequest {
    pub style: String,
    pub text: Option<String>,
    pub document: Option<DocumentUpload>,
}

/// Stateless summarization response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatelessSummarizeResponse {
    pub summary: String,
    pub style: String,
    pub input_word_count: i64,
    pub output_word_count: i64,
    pub processing_seconds: f64,
    pub quality_score: f64,
}

/// Persisted summary response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub id: i64,
    pub user_id: String,
    pub document_name: String,
    pub document_type: String,
    pub style: String,
    pub summary: String,
    pub input_word_count: i64,
    pub output_word_count: i64,
    pub processing_seconds: f64,
    pub quality_score: f64,
    pub file_size: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<SummaryRecord> for SummaryResponse {
    fn from(record: SummaryRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            document_name: record.document_name,
            document_type: record.document_type,
            style: record.style.to_string(),
            summary: record.summary,
            input_word_count: record.input_word_count,
            output_word_count: record.output_word_count,
            processing_seconds: record.processing_seconds,
            quality_score: record.quality_score,
            file_size: record.file_size,
            created_at: record.created_at,
        }
    }
}

/// Summary list response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryListResponse {
    pub summaries: Vec<SummaryResponse>,
    pub count: usize,
}

impl From<Vec<SummaryRecord>> for SummaryListResponse {
    fn from(records: Vec<SummaryRecord>) -> Self {
        let summaries: Vec<SummaryResponse> =
            records.into_iter().map(SummaryResponse::from).collect();
        let count = summaries.len();
        Self { summaries, count }
    }
}

/// History pagination query
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Search query
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// Recent-window query
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub days: Option<u32>,
}

// ========================================
// Handlers
// ========================================

/// Decode the text-or-document pair into an input source.
fn decode_source(
    text: Option<String>,
    document: Option<DocumentUpload>,
) -> Result<InputSource> {
    match (text, document) {
        (Some(text), None) => Ok(InputSource::Text(text)),
        (None, Some(doc)) => {
            let format: DocumentFormat = doc.declared_type.parse()?;
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(doc.content_base64.as_bytes())
                .map_err(|e| {
                    Error::Validation(format!("document content is not valid base64: {}", e))
                })?;
            Ok(InputSource::File {
                name: doc.name,
                format,
                bytes,
            })
        }
        (Some(_), Some(_)) => Err(Error::Validation(
            "provide either text or document, not both".to_string(),
        )),
        (None, None) => Err(Error::Validation(
            "provide either text or document".to_string(),
        )),
    }
}

/// POST /summarize
async fn summarize(
    State(state): State<AppState>,
    Json(req): Json<StatelessSummarizeRequest>,
) -> Result<impl IntoResponse> {
    let style: SummaryStyle = req.style.parse()?;
    let source = decode_source(req.text, req.document)?;

    let output = state.service.summarize(source, style).await?;

    Ok(Json(StatelessSummarizeResponse {
        summary: output.text,
        style: style.to_string(),
        input_word_count: output.input_words,
        output_word_count: output.output_words,
        processing_seconds: output.duration.as_secs_f64(),
        quality_score: output.quality_score,
    }))
}

/// POST /summarize-with-db
async fn summarize_with_db(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Result<impl IntoResponse> {
    let style: SummaryStyle = req.style.parse()?;
    let source = decode_source(req.text, req.document)?;

    let record = state
        .service
        .summarize_and_save(&req.user_id, source, style)
        .await?;

    Ok(Json(SummaryResponse::from(record)))
}

/// GET /styles
async fn list_styles() -> impl IntoResponse {
    Json(json!({
        "styles": [
            { "name": "bullets", "description": "Key points as a bulleted list" },
            { "name": "abstract", "description": "One dense paragraph" },
            { "name": "detailed", "description": "Multi-paragraph detailed summary" }
        ]
    }))
}

/// GET /user/:user_id/summaries
async fn list_summaries(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse> {
    let page = query.page.unwrap_or(1);
    let page_size = query.page_size.unwrap_or(20);
    let records = state.service.history(&user_id, page, page_size).await?;
    Ok(Json(SummaryListResponse::from(records)))
}

/// GET /user/:user_id/summary/:summary_id
async fn get_summary(
    State(state): State<AppState>,
    Path((user_id, summary_id)): Path<(String, i64)>,
) -> Result<impl IntoResponse> {
    let record = state.service.get(&user_id, summary_id).await?;
    Ok(Json(SummaryResponse::from(record)))
}

/// DELETE /user/:user_id/summary/:summary_id
async fn delete_summary(
    State(state): State<AppState>,
    Path((user_id, summary_id)): Path<(String, i64)>,
) -> Result<impl IntoResponse> {
    state.service.delete(&user_id, summary_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /user/:user_id/statistics
async fn user_statistics(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse> {
    let stats = state.service.stats(&user_id).await?;
    Ok(Json(stats))
}

/// GET /user/:user_id/search?q=
async fn search_summaries(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let records = state.service.search(&user_id, &query.q).await?;
    Ok(Json(SummaryListResponse::from(records)))
}

/// GET /user/:user_id/recent?days=
async fn recent_summaries(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<RecentQuery>,
) -> Result<impl IntoResponse> {
    let days = query.days.unwrap_or(7);
    let records = state.service.recent(&user_id, days).await?;
    Ok(Json(SummaryListResponse::from(records)))
}
