//! SummarizerClient integration tests against a local mock provider.
//!
//! Each test spins up a throwaway HTTP server that answers every path with
//! a canned response, so the full request/parse path runs without leaving
//! the host.

use axum::http::StatusCode;
use axum::{Json, Router};
use briefly::summarizer::{SummarizerClient, SummaryStyle};
use briefly::Error;
use serde_json::{json, Value};

async fn spawn_provider(status: StatusCode, body: Value) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new().fallback(move || {
        let body = body.clone();
        async move { (status, Json(body)) }
    });

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client_for(base_url: String) -> SummarizerClient {
    SummarizerClient::new(base_url, "test-model".to_string(), "test-key".to_string())
}

#[tokio::test]
async fn summarize_returns_full_output_for_every_style() {
    let base_url = spawn_provider(
        StatusCode::OK,
        json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "- the plan\n" },
                        { "text": "- the outcome" }
                    ]
                }
            }]
        }),
    )
    .await;
    let client = client_for(base_url);

    let input = "The committee approved the plan after a long debate and \
                 scheduled a follow-up review of the outcome for next quarter.";

    for style in [
        SummaryStyle::Bullets,
        SummaryStyle::Abstract,
        SummaryStyle::Detailed,
    ] {
        let output = client.summarize(input, style).await.unwrap();

        // Adjacent parts are concatenated in order.
        assert_eq!(output.text, "- the plan\n- the outcome");
        assert!(output.input_words > 0);
        assert!(output.output_words > 0);
        assert!((0.0..=1.0).contains(&output.quality_score));
    }
}

#[tokio::test]
async fn empty_candidates_fail_as_summarization_error() {
    let base_url = spawn_provider(StatusCode::OK, json!({ "candidates": [] })).await;
    let client = client_for(base_url);

    let err = client
        .summarize("some text to summarize", SummaryStyle::Bullets)
        .await
        .unwrap_err();
    match err {
        Error::SummarizationFailed(msg) => assert!(msg.contains("no text")),
        other => panic!("expected SummarizationFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn blank_part_text_fails_as_summarization_error() {
    let base_url = spawn_provider(
        StatusCode::OK,
        json!({
            "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
        }),
    )
    .await;
    let client = client_for(base_url);

    let err = client
        .summarize("some text to summarize", SummaryStyle::Abstract)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::SummarizationFailed(_)));
}

#[tokio::test]
async fn provider_error_status_surfaces_with_reason() {
    let base_url = spawn_provider(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "model overloaded" }),
    )
    .await;
    let client = client_for(base_url);

    let err = client
        .summarize("some text to summarize", SummaryStyle::Detailed)
        .await
        .unwrap_err();
    match err {
        Error::SummarizationFailed(msg) => {
            assert!(msg.contains("500"));
            assert!(msg.contains("model overloaded"));
        }
        other => panic!("expected SummarizationFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn non_json_body_fails_as_summarization_error() {
    // A plain-text 200 body is not a provider response.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(|| async { "not json" });
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = client_for(format!("http://{}", addr));
    let err = client
        .summarize("some text to summarize", SummaryStyle::Bullets)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::SummarizationFailed(_)));
}
