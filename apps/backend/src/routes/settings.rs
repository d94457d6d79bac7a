//! Settings endpoints

use axum::{extract::State, Json};
use bahasa_core::{SettingsOverride, StudySettings};

use crate::error::Result;
use crate::AppState;

/// GET /api/settings
pub async fn get(State(state): State<AppState>) -> Json<StudySettings> {
    Json(state.store.settings().await)
}

/// PUT /api/settings
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<SettingsOverride>,
) -> Result<Json<StudySettings>> {
    let updated = state.store.update_settings(&request).await?;
    tracing::info!("Study settings updated");
    Ok(Json(updated))
}
