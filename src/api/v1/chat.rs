//! Chat endpoints: the participant <-> administrator conversation

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::chat::ChatMessage;
use crate::domain::user::UserId;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub body: String,
    /// Administrators must address a participant; participants may omit
    /// this and the message goes to the administrator
    #[serde(default)]
    pub receiver_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    /// Which participant's conversation an administrator wants
    #[serde(default)]
    pub with: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    pub marked: usize,
}

/// POST /v1/chat
pub async fn send(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<ChatMessage>, ApiError> {
    let receiver_id = match request.receiver_id {
        Some(id) => id,
        None => {
            if user.is_admin() {
                return Err(ApiError::bad_request(
                    "Administrators must address a recipient",
                ));
            }
            state
                .chat_service
                .admin_contact()
                .await?
                .id()
                .as_str()
                .to_string()
        }
    };

    let message = state.chat_service.send(&user, &receiver_id, request.body).await?;
    Ok(Json(message))
}

/// GET /v1/chat?with={user_id}
pub async fn conversation(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    axum::extract::Query(query): axum::extract::Query<ConversationQuery>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let other = other_party(&state, &user, query.with).await?;
    let messages = state.chat_service.conversation(user.id(), &other).await?;
    Ok(Json(messages))
}

/// POST /v1/chat/read
pub async fn mark_read(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(query): Json<ConversationQuery>,
) -> Result<Json<MarkReadResponse>, ApiError> {
    let other = other_party(&state, &user, query.with).await?;
    let marked = state
        .chat_service
        .mark_conversation_read(user.id(), &other)
        .await?;
    Ok(Json(MarkReadResponse { marked }))
}

/// Resolve who the other side of the conversation is: participants always
/// talk to the administrator; administrators name the participant
async fn other_party(
    state: &AppState,
    user: &crate::domain::user::User,
    with: Option<String>,
) -> Result<UserId, ApiError> {
    match with {
        Some(id) => Ok(UserId::from_string(id)),
        None => {
            if user.is_admin() {
                return Err(ApiError::bad_request(
                    "Administrators must name a conversation partner",
                ));
            }
            Ok(state.chat_service.admin_contact().await?.id().clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_without_receiver() {
        let json = r#"{"body": "Hello!"}"#;
        let request: SendMessageRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.body, "Hello!");
        assert!(request.receiver_id.is_none());
    }
}
