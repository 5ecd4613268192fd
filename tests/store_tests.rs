//! SummaryStore integration tests against an in-memory SQLite database.

use briefly::store::{NewSummary, SummaryStore};
use briefly::summarizer::SummaryStyle;
use briefly::Error;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::Row;

async fn test_store() -> SummaryStore {
    // Single connection so every query sees the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = SummaryStore::new(pool);
    store.init_schema().await.unwrap();
    store
}

fn new_summary(user_id: &str, name: &str, style: SummaryStyle) -> NewSummary {
    NewSummary {
        user_id: user_id.to_string(),
        document_name: name.to_string(),
        document_type: "txt".to_string(),
        style,
        summary: format!("summary of {}", name),
        input_word_count: 500,
        output_word_count: 50,
        processing_seconds: 1.25,
        quality_score: 0.75,
        file_size: Some(2048),
    }
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let store = test_store().await;

    let created = store
        .create(new_summary("alice", "report.txt", SummaryStyle::Bullets))
        .await
        .unwrap();
    assert!(created.id > 0);

    let fetched = store.get("alice", created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_is_scoped_to_owner() {
    let store = test_store().await;
    let created = store
        .create(new_summary("alice", "report.txt", SummaryStyle::Bullets))
        .await
        .unwrap();

    let err = store.get("bob", created.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn list_returns_newest_first_with_id_tiebreak() {
    let store = test_store().await;
    for name in ["first.txt", "second.txt", "third.txt"] {
        store
            .create(new_summary("alice", name, SummaryStyle::Abstract))
            .await
            .unwrap();
    }

    let page = store.list("alice", 1, 10).await.unwrap();
    assert_eq!(page.len(), 3);
    // Same-timestamp inserts fall back to id ordering.
    assert_eq!(page[0].document_name, "third.txt");
    assert_eq!(page[2].document_name, "first.txt");
}

#[tokio::test]
async fn list_past_the_end_is_empty() {
    let store = test_store().await;
    store
        .create(new_summary("alice", "only.txt", SummaryStyle::Bullets))
        .await
        .unwrap();

    let page = store.list("alice", 5, 10).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn search_is_case_insensitive_over_name_and_summary() {
    let store = test_store().await;
    store
        .create(new_summary("alice", "Quarterly-Report.txt", SummaryStyle::Bullets))
        .await
        .unwrap();
    store
        .create(new_summary("alice", "notes.txt", SummaryStyle::Bullets))
        .await
        .unwrap();

    let by_name = store.search("alice", "quarterly").await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].document_name, "Quarterly-Report.txt");

    // The generated summary text is "summary of notes.txt".
    let by_summary = store.search("alice", "NOTES").await.unwrap();
    assert_eq!(by_summary.len(), 1);

    let none = store.search("alice", "absent").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn search_treats_like_metacharacters_literally() {
    let store = test_store().await;
    store
        .create(new_summary("alice", "progress 100% done.txt", SummaryStyle::Bullets))
        .await
        .unwrap();
    store
        .create(new_summary("alice", "unrelated.txt", SummaryStyle::Bullets))
        .await
        .unwrap();

    // "100%" must not act as a wildcard matching every row.
    let results = store.search("alice", "100%").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document_name, "progress 100% done.txt");

    // "_" matches only a literal underscore, not any character.
    let none = store.search("alice", "unrelated_txt").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn search_does_not_cross_users() {
    let store = test_store().await;
    store
        .create(new_summary("alice", "shared-topic.txt", SummaryStyle::Bullets))
        .await
        .unwrap();

    let results = store.search("bob", "shared").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn delete_removes_summary_and_analytics() {
    let store = test_store().await;
    let created = store
        .create(new_summary("alice", "report.txt", SummaryStyle::Bullets))
        .await
        .unwrap();

    let events: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM analytics_events WHERE summary_id = ?")
            .bind(created.id)
            .fetch_one(store.pool())
            .await
            .unwrap();
    assert_eq!(events, 1);

    store.delete("alice", created.id).await.unwrap();

    let err = store.get("alice", created.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let events: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM analytics_events WHERE summary_id = ?")
            .bind(created.id)
            .fetch_one(store.pool())
            .await
            .unwrap();
    assert_eq!(events, 0);

    // Second delete of the same id reports NotFound.
    let err = store.delete("alice", created.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn delete_is_scoped_to_owner() {
    let store = test_store().await;
    let created = store
        .create(new_summary("alice", "report.txt", SummaryStyle::Bullets))
        .await
        .unwrap();

    let err = store.delete("bob", created.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    // Still present for the owner.
    assert!(store.get("alice", created.id).await.is_ok());
}

#[tokio::test]
async fn statistics_zeroed_for_unknown_user() {
    let store = test_store().await;
    let stats = store.statistics("nobody").await.unwrap();
    assert_eq!(stats.count, 0);
    assert_eq!(stats.total_words_summarized, 0);
    assert_eq!(stats.average_quality, 0.0);
    assert_eq!(stats.favorite_style, None);
}

#[tokio::test]
async fn statistics_aggregates_and_picks_favorite_style() {
    let store = test_store().await;
    store
        .create(new_summary("alice", "a.txt", SummaryStyle::Bullets))
        .await
        .unwrap();
    store
        .create(new_summary("alice", "b.txt", SummaryStyle::Bullets))
        .await
        .unwrap();
    store
        .create(new_summary("alice", "c.txt", SummaryStyle::Detailed))
        .await
        .unwrap();

    let stats = store.statistics("alice").await.unwrap();
    assert_eq!(stats.count, 3);
    assert_eq!(stats.total_words_summarized, 1500);
    assert!((stats.average_quality - 0.75).abs() < 1e-9);
    assert!((stats.average_duration_seconds - 1.25).abs() < 1e-9);
    assert_eq!(stats.favorite_style.as_deref(), Some("bullets"));
}

#[tokio::test]
async fn statistics_favorite_style_tie_breaks_alphabetically() {
    let store = test_store().await;
    store
        .create(new_summary("alice", "a.txt", SummaryStyle::Detailed))
        .await
        .unwrap();
    store
        .create(new_summary("alice", "b.txt", SummaryStyle::Abstract))
        .await
        .unwrap();

    let stats = store.statistics("alice").await.unwrap();
    assert_eq!(stats.favorite_style.as_deref(), Some("abstract"));
}

#[tokio::test]
async fn recent_includes_fresh_rows() {
    let store = test_store().await;
    store
        .create(new_summary("alice", "fresh.txt", SummaryStyle::Bullets))
        .await
        .unwrap();

    let recent = store.recent("alice", 7).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].document_name, "fresh.txt");
}

#[tokio::test]
async fn recent_excludes_old_rows() {
    let store = test_store().await;
    let created = store
        .create(new_summary("alice", "old.txt", SummaryStyle::Bullets))
        .await
        .unwrap();

    // Backdate the row beyond the window.
    let backdated = chrono::Utc::now() - chrono::Duration::days(30);
    sqlx::query("UPDATE summaries SET created_at = ? WHERE id = ?")
        .bind(backdated)
        .bind(created.id)
        .execute(store.pool())
        .await
        .unwrap();

    let recent = store.recent("alice", 7).await.unwrap();
    assert!(recent.is_empty());
}

#[tokio::test]
async fn cleanup_removes_old_rows_and_their_analytics() {
    let store = test_store().await;
    let old = store
        .create(new_summary("alice", "old.txt", SummaryStyle::Bullets))
        .await
        .unwrap();
    store
        .create(new_summary("bob", "fresh.txt", SummaryStyle::Bullets))
        .await
        .unwrap();

    let backdated = chrono::Utc::now() - chrono::Duration::days(90);
    sqlx::query("UPDATE summaries SET created_at = ? WHERE id = ?")
        .bind(backdated)
        .bind(old.id)
        .execute(store.pool())
        .await
        .unwrap();

    let removed = store.cleanup_older_than(30).await.unwrap();
    assert_eq!(removed, 1);

    // The old summary and its analytics event are gone; the fresh one stays.
    let err = store.get("alice", old.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    let events: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM analytics_events WHERE summary_id = ?")
            .bind(old.id)
            .fetch_one(store.pool())
            .await
            .unwrap();
    assert_eq!(events, 0);
    assert_eq!(store.list("bob", 1, 10).await.unwrap().len(), 1);

    // Nothing left in the window; a second pass removes nothing.
    assert_eq!(store.cleanup_older_than(30).await.unwrap(), 0);
}

#[tokio::test]
async fn repeat_creates_keep_one_user_row() {
    let store = test_store().await;
    store
        .create(new_summary("alice", "a.txt", SummaryStyle::Bullets))
        .await
        .unwrap();
    store
        .create(new_summary("alice", "b.txt", SummaryStyle::Bullets))
        .await
        .unwrap();

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE user_id = 'alice'")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(users, 1);

    let row = sqlx::query("SELECT user_id FROM users WHERE user_id = 'alice'")
        .fetch_one(store.pool())
        .await
        .unwrap();
    let user_id: String = row.get("user_id");
    assert_eq!(user_id, "alice");
}
