//! Catalog API tests.

mod common;

use axum::http::StatusCode;

use common::fixtures;
use common::TestContext;

#[tokio::test]
async fn test_import_assigns_ids_and_roots() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/catalog/import")
        .json(&fixtures::import_request(fixtures::SAMPLE_VOCAB, None))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["imported"], 6);
    assert_eq!(body["total"], 6);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[3]["surface_form"], "memasak");
    assert_eq!(items[3]["root"], "masak");
    assert_eq!(items[4]["kind"], "phrase");
    assert_eq!(items[5]["root"], "bersih");
}

#[tokio::test]
async fn test_reimport_skips_existing_entries() {
    let ctx = TestContext::new();
    let server = ctx.server();
    ctx.seed(&server).await;

    let response = server
        .post("/api/catalog/import")
        .json(&fixtures::import_request("makan | to eat\nbaca | to read", None))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["imported"], 1);
    assert_eq!(body["total"], 7);
    assert_eq!(body["items"][0]["id"], 7);
}

#[tokio::test]
async fn test_import_uses_corpus_frequencies() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/catalog/import")
        .json(&fixtures::import_request(
            "masakan | dish",
            Some("Ibu memasak. Kami masak. Dia masak lagi."),
        ))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["items"][0]["frequency"], 3);
}

#[tokio::test]
async fn test_import_rejects_malformed_list() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/catalog/import")
        .json(&fixtures::import_request("makan | to eat\nminum", None))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "parse_error");

    // Nothing was imported
    let list: serde_json::Value = server.get("/api/catalog").await.json();
    assert_eq!(list["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_get_item() {
    let ctx = TestContext::new();
    let server = ctx.server();
    ctx.seed(&server).await;

    let response = server.get("/api/catalog/2").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["surface_form"], "masak");
    assert_eq!(body["translation"], "to cook");

    let response = server.get("/api/catalog/99").await;
    response.assert_status(StatusCode::NOT_FOUND);
}
