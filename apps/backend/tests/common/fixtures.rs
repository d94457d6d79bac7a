//! Test fixtures and factory functions for creating test data.

use serde_json::json;

/// Small vocabulary list: ids 1..=6 in this order.
pub const SAMPLE_VOCAB: &str = "\
# food
makan | to eat | 1 | 120
masak | to cook | 1 | 40
minum | to drink | 2 | 90
memasak | cooking | 3
selamat pagi | good morning | 2 | 60
kebersihan | cleanliness | 5 | 5
";

/// Create an import request body.
pub fn import_request(content: &str, corpus: Option<&str>) -> serde_json::Value {
    match corpus {
        Some(text) => json!({ "content": content, "corpus": text }),
        None => json!({ "content": content }),
    }
}

/// Create an answer request body.
pub fn answer_request(item_id: i64, submitted: &str, mode: &str, direction: &str) -> serde_json::Value {
    json!({
        "item_id": item_id,
        "submitted": submitted,
        "mode": mode,
        "direction": direction
    })
}

/// Typed answer asking for the Indonesian form.
pub fn typed_answer(item_id: i64, submitted: &str) -> serde_json::Value {
    answer_request(item_id, submitted, "typing", "to_surface")
}

/// Create a settings update body.
pub fn settings_update(pass_threshold: Option<f64>, daily_goal: Option<usize>) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    if let Some(t) = pass_threshold {
        obj.insert("pass_threshold".to_string(), json!(t));
    }
    if let Some(g) = daily_goal {
        obj.insert("daily_goal".to_string(), json!(g));
    }
    serde_json::Value::Object(obj)
}
