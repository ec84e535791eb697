//! Account management admin endpoints

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::auth::UserResponse;
use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::UserRole;
use crate::infrastructure::services::UpdateUserRequest;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateUserApiRequest {
    pub full_name: Option<String>,
    pub social_link: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<ListUsersResponse>, ApiError> {
    let users = state.user_service.list().await?;
    let users: Vec<UserResponse> = users.iter().map(UserResponse::from_user).collect();
    let total = users.len();

    Ok(Json(ListUsersResponse { users, total }))
}

/// PUT /admin/users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %user_id, "Admin updating account");

    let user = state
        .user_service
        .update(
            &user_id,
            UpdateUserRequest {
                full_name: request.full_name,
                social_link: request.social_link.map(Some),
                role: request.role,
            },
        )
        .await?;
    Ok(Json(UserResponse::from_user(&user)))
}
