//! Summary repository
//!
//! ## Tables
//! - summaries: one row per summarization result
//! - users: identifier-only, reserved for expansion
//! - analytics_events: one usage event per successful summarization

use super::types::{NewSummary, SummaryRecord, UserStats};
use crate::error::{Error, Result};
use crate::summarizer::SummaryStyle;
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};

/// Summary persistence over a SQLite pool
#[derive(Clone)]
pub struct SummaryStore {
    pool: SqlitePool,
}

impl SummaryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Pool accessor
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables and indexes if they don't exist.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS summaries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                document_name TEXT NOT NULL,
                document_type TEXT NOT NULL,
                style TEXT NOT NULL,
                summary TEXT NOT NULL,
                input_word_count INTEGER NOT NULL,
                output_word_count INTEGER NOT NULL,
                processing_seconds REAL NOT NULL,
                quality_score REAL NOT NULL,
                file_size INTEGER,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS analytics_events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                summary_id INTEGER NOT NULL,
                user_id TEXT NOT NULL,
                action TEXT NOT NULL,
                processing_seconds REAL NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (summary_id) REFERENCES summaries (id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_summaries_user_id ON summaries(user_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_summaries_created_at ON summaries(created_at)")
            .execute(&self.pool)
            .await?;

        info!("Summary store schema ready");
        Ok(())
    }

    /// Insert a summary, its analytics event, and the owning user row.
    ///
    /// Runs in one transaction; failure surfaces as `StoreWrite`.
    pub async fn create(&self, data: NewSummary) -> Result<SummaryRecord> {
        let created_at = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::StoreWrite(e.to_string()))?;

        let result = sqlx::query(
            r#"
            INSERT INTO summaries
                (user_id, document_name, document_type, style, summary,
                 input_word_count, output_word_count, processing_seconds,
                 quality_score, file_size, created_at)
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&data.user_id)
        .bind(&data.document_name)
        .bind(&data.document_type)
        .bind(data.style.to_string())
        .bind(&data.summary)
        .bind(data.input_word_count)
        .bind(data.output_word_count)
        .bind(data.processing_seconds)
        .bind(data.quality_score)
        .bind(data.file_size)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::StoreWrite(e.to_string()))?;

        let summary_id = result.last_insert_rowid();

        sqlx::query(
            r#"
            INSERT INTO users (user_id, created_at)
            VALUES (?, ?)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(&data.user_id)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::StoreWrite(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO analytics_events
                (summary_id, user_id, action, processing_seconds, created_at)
            VALUES (?, ?, 'summarize', ?, ?)
            "#,
        )
        .bind(summary_id)
        .bind(&data.user_id)
        .bind(data.processing_seconds)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::StoreWrite(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| Error::StoreWrite(e.to_string()))?;

        info!(
            summary_id = summary_id,
            user_id = %data.user_id,
            style = %data.style,
            "Summary saved"
        );

        Ok(SummaryRecord {
            id: summary_id,
            user_id: data.user_id,
            document_name: data.document_name,
            document_type: data.document_type,
            style: data.style,
            summary: data.summary,
            input_word_count: data.input_word_count,
            output_word_count: data.output_word_count,
            processing_seconds: data.processing_seconds,
            quality_score: data.quality_score,
            file_size: data.file_size,
            created_at,
        })
    }

    /// Fetch one summary; `NotFound` covers both absence and foreign
    /// ownership.
    pub async fn get(&self, user_id: &str, summary_id: i64) -> Result<SummaryRecord> {
        let row = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT id, user_id, document_name, document_type, style, summary,
                   input_word_count, output_word_count, processing_seconds,
                   quality_score, file_size, created_at
            FROM summaries
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(summary_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(SummaryRow::into_record).transpose()?.ok_or_else(|| {
            Error::NotFound(format!("summary {} not found", summary_id))
        })
    }

    /// Page through a user's summaries, newest first.
    ///
    /// `page` is 1-based; a page past the end yields an empty vec.
    pub async fn list(
        &self,
        user_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<SummaryRecord>> {
        let offset = (page.saturating_sub(1) as i64) * page_size as i64;

        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT id, user_id, document_name, document_type, style, summary,
                   input_word_count, output_word_count, processing_seconds,
                   quality_score, file_size, created_at
            FROM summaries
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(user_id)
        .bind(page_size as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SummaryRow::into_record).collect()
    }

    /// Case-insensitive substring search over document name and summary text.
    ///
    /// The query is treated literally; LIKE metacharacters are escaped.
    pub async fn search(&self, user_id: &str, query: &str) -> Result<Vec<SummaryRecord>> {
        let pattern = format!("%{}%", escape_like(&query.to_lowercase()));

        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT id, user_id, document_name, document_type, style, summary,
                   input_word_count, output_word_count, processing_seconds,
                   quality_score, file_size, created_at
            FROM summaries
            WHERE user_id = ?
              AND (LOWER(document_name) LIKE ? ESCAPE '\'
                   OR LOWER(summary) LIKE ? ESCAPE '\')
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SummaryRow::into_record).collect()
    }

    /// Summaries created within the last `days` days.
    pub async fn recent(&self, user_id: &str, days: u32) -> Result<Vec<SummaryRecord>> {
        let cutoff = Utc::now() - Duration::days(days as i64);

        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT id, user_id, document_name, document_type, style, summary,
                   input_word_count, output_word_count, processing_seconds,
                   quality_score, file_size, created_at
            FROM summaries
            WHERE user_id = ? AND created_at >= ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SummaryRow::into_record).collect()
    }

    /// Delete a summary (and its analytics event) under the same ownership
    /// rule as `get`. Deleting an absent id reports `NotFound`.
    pub async fn delete(&self, user_id: &str, summary_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM analytics_events
            WHERE summary_id IN (
                SELECT id FROM summaries WHERE id = ? AND user_id = ?
            )
            "#,
        )
        .bind(summary_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM summaries WHERE id = ? AND user_id = ?")
            .bind(summary_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!(
                "summary {} not found",
                summary_id
            )));
        }

        debug!(summary_id = summary_id, user_id = %user_id, "Summary deleted");
        Ok(())
    }

    /// Delete summaries older than `days` days across all users, analytics
    /// events included. Returns the number of summaries removed.
    pub async fn cleanup_older_than(&self, days: u32) -> Result<u64> {
        let cutoff = Utc::now() - Duration::days(days as i64);

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM analytics_events
            WHERE summary_id IN (
                SELECT id FROM summaries WHERE created_at < ?
            )
            "#,
        )
        .bind(cutoff)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM summaries WHERE created_at < ?")
            .bind(cutoff)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let removed = result.rows_affected();
        if removed > 0 {
            info!(removed = removed, days = days, "Old summaries cleaned up");
        }
        Ok(removed)
    }

    /// Aggregate statistics over all of a user's summaries. Zeroed stats for
    /// an unknown user.
    pub async fn statistics(&self, user_id: &str) -> Result<UserStats> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM summaries WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        if count == 0 {
            return Ok(UserStats::zeroed());
        }

        let total_words: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(input_word_count), 0) FROM summaries WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let average_quality: f64 = sqlx::query_scalar(
            "SELECT COALESCE(AVG(quality_score), 0.0) FROM summaries WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let average_duration: f64 = sqlx::query_scalar(
            "SELECT COALESCE(AVG(processing_seconds), 0.0) FROM summaries WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let favorite_style: Option<String> = sqlx::query_scalar(
            r#"
            SELECT style FROM summaries
            WHERE user_id = ?
            GROUP BY style
            ORDER BY COUNT(*) DESC, style ASC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(UserStats {
            count,
            total_words_summarized: total_words,
            average_quality,
            average_duration_seconds: average_duration,
            favorite_style,
        })
    }
}

/// Escape LIKE metacharacters so user queries match literally.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

// ============================================================
// Row structures
// ============================================================

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    user_id: String,
    document_name: String,
    document_type: String,
    style: String,
    summary: String,
    input_word_count: i64,
    output_word_count: i64,
    processing_seconds: f64,
    quality_score: f64,
    file_size: Option<i64>,
    created_at: DateTime<Utc>,
}

impl SummaryRow {
    fn into_record(self) -> Result<SummaryRecord> {
        let style = SummaryStyle::from_str(&self.style)?;
        Ok(SummaryRecord {
            id: self.id,
            user_id: self.user_id,
            document_name: self.document_name,
            document_type: self.document_type,
            style,
            summary: self.summary,
            input_word_count: self.input_word_count,
            output_word_count: self.output_word_count,
            processing_seconds: self.processing_seconds,
            quality_score: self.quality_score,
            file_size: self.file_size,
            created_at: self.created_at,
        })
    }
}
