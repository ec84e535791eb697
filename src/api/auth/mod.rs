//! Authentication endpoints
//!
//! Registration, login and session self-service for JWT-based sessions.

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::User;
use crate::infrastructure::services::RegisterUserRequest;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(get_current_user).put(update_profile))
        .route("/change-password", post(change_password))
}

/// Registration request; every self-registered account is a participant
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub social_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
    pub expires_at: String,
}

/// Account details safe to expose (never the password hash)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_link: Option<String>,
    pub role: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            full_name: user.full_name().to_string(),
            email: user.email().to_string(),
            social_link: user.social_link().map(String::from),
            role: user.role().to_string(),
            created_at: user.created_at().to_rfc3339(),
            last_login_at: user.last_login_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .user_service
        .register(RegisterUserRequest {
            full_name: request.full_name,
            email: request.email,
            password: request.password,
            social_link: request.social_link,
        })
        .await?;

    issue_session(&state, user)
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .user_service
        .authenticate(&request.email, &request.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    issue_session(&state, user)
}

/// POST /auth/logout
///
/// Sessions are stateless; logout is the client discarding its token. The
/// endpoint exists for API symmetry.
pub async fn logout(_user: RequireUser) -> Result<Json<LogoutResponse>, ApiError> {
    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// GET /auth/me
pub async fn get_current_user(
    RequireUser(user): RequireUser,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(UserResponse::from_user(&user)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: String,
    #[serde(default)]
    pub social_link: Option<String>,
}

/// PUT /auth/me
pub async fn update_profile(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let updated = state
        .user_service
        .update_profile(user.id().as_str(), request.full_name, request.social_link)
        .await?;

    Ok(Json(UserResponse::from_user(&updated)))
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// POST /auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<LogoutResponse>, ApiError> {
    state
        .user_service
        .change_password(
            user.id().as_str(),
            &request.current_password,
            &request.new_password,
        )
        .await?;

    Ok(Json(LogoutResponse {
        message: "Password changed".to_string(),
    }))
}

fn issue_session(state: &AppState, user: User) -> Result<Json<LoginResponse>, ApiError> {
    let token = state.jwt_service.generate(&user)?;
    let expires_at = Utc::now() + Duration::hours(state.jwt_service.expiration_hours() as i64);

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from_user(&user),
        expires_at: expires_at.to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;

    #[test]
    fn test_user_response_hides_password_hash() {
        let user = User::new(
            "Asha Rahman",
            "asha@example.com",
            UserRole::Participant,
            "argon2-secret-hash",
        )
        .unwrap();

        let json = serde_json::to_string(&UserResponse::from_user(&user)).unwrap();

        assert!(json.contains("asha@example.com"));
        assert!(json.contains("\"role\":\"participant\""));
        assert!(!json.contains("argon2-secret-hash"));
    }

    #[test]
    fn test_register_request_deserialization() {
        let json = r#"{
            "full_name": "Asha Rahman",
            "email": "asha@example.com",
            "password": "strong-password"
        }"#;

        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.full_name, "Asha Rahman");
        assert!(request.social_link.is_none());
    }
}
