//! Season history listing

use axum::extract::State;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::history::SeasonRecord;

/// GET /v1/history
pub async fn list(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
) -> Result<Json<Vec<SeasonRecord>>, ApiError> {
    let records = state.history_service.list().await?;
    Ok(Json(records))
}
