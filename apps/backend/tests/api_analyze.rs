//! Analysis API tests.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestContext;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}

/// Stemming returns ranked candidates with the dictionary root first.
#[tokio::test]
async fn test_stem_returns_dictionary_root_first() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/analyze/stem")
        .json(&json!({ "surface": "memasak" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["surface"], "memasak");
    assert_eq!(body["candidates"][0]["root"], "masak");
    assert_eq!(body["candidates"][0]["confidence"], 1.0);
    assert_eq!(body["candidates"][0]["in_dictionary"], true);
    assert!(body["candidates"].as_array().unwrap().len() > 1);
}

#[tokio::test]
async fn test_stem_rejects_blank_input() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/analyze/stem")
        .json(&json!({ "surface": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn test_analyze_text() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let text = "Saya memasak nasi. Ibu masak nasi goreng. Saya memasak nasi lagi.";
    let response = server
        .post("/api/analyze/text")
        .json(&json!({ "text": text }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["analysis"]["total_words"], 11);

    let stems = body["analysis"]["stem_frequency"].as_array().unwrap();
    let masak = stems.iter().find(|s| s["text"] == "masak").unwrap();
    assert_eq!(masak["count"], 3);

    let phrases = body["phrases"].as_array().unwrap();
    assert!(phrases.iter().any(|p| p["text"] == "saya memasak nasi" && p["count"] == 2));
}
