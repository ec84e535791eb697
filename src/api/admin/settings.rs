//! Site settings admin endpoints

use axum::extract::State;
use serde::Deserialize;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::settings::SiteSettings;

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSettingsApiRequest {
    pub show_participant_teams: bool,
}

/// GET /admin/settings
pub async fn get_settings(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<SiteSettings>, ApiError> {
    let settings = state.settings_service.get().await?;
    Ok(Json(settings))
}

/// PUT /admin/settings
pub async fn update_settings(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(request): Json<UpdateSettingsApiRequest>,
) -> Result<Json<SiteSettings>, ApiError> {
    let settings = state
        .settings_service
        .set_show_participant_teams(request.show_participant_teams)
        .await?;
    Ok(Json(settings))
}
