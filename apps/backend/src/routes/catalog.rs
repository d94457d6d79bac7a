//! Catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use bahasa_core::{analyze_text, parse, ItemId, LexicalItem};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// POST /api/catalog/import
pub async fn import(
    State(state): State<AppState>,
    Json(payload): Json<ImportRequest>,
) -> Result<Json<ImportResponse>> {
    let entries = parse(&payload.content)?;
    let corpus = match payload.corpus.as_deref() {
        Some(text) => Some(analyze_text(&state.ctx, text)?),
        None => None,
    };

    let (items, total) = state
        .store
        .import(&state.ctx, entries, corpus.as_ref())
        .await?;

    tracing::info!("Imported {} entries ({} total)", items.len(), total);

    Ok(Json(ImportResponse {
        imported: items.len(),
        total,
        items,
    }))
}

/// GET /api/catalog
pub async fn list(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        items: state.store.items().await,
    })
}

/// GET /api/catalog/:item_id
pub async fn get(
    State(state): State<AppState>,
    Path(item_id): Path<ItemId>,
) -> Result<Json<LexicalItem>> {
    Ok(Json(state.store.get_item(item_id).await?))
}
