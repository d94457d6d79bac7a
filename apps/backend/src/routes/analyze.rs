//! Analysis endpoints

use axum::{extract::State, Json};
use bahasa_core::{analyze_text, extract_phrases};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// POST /api/analyze/stem
pub async fn stem(
    State(state): State<AppState>,
    Json(payload): Json<StemRequest>,
) -> Result<Json<StemResponse>> {
    let candidates = state.ctx.stem(&payload.surface)?;

    Ok(Json(StemResponse {
        surface: payload.surface,
        candidates,
    }))
}

/// POST /api/analyze/text
pub async fn text(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalyzeTextResponse>> {
    let analysis = analyze_text(&state.ctx, &payload.text)?;
    let phrases = extract_phrases(&payload.text);

    Ok(Json(AnalyzeTextResponse { analysis, phrases }))
}
