//! Direct messages between participants and the administrator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::UserId;

/// Chat message identifier (UUID assigned at creation)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatMessageId(String);

impl ChatMessageId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StorageKey for ChatMessageId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// One message in a participant <-> administrator conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    id: ChatMessageId,
    sender_id: UserId,
    /// Denormalised for display without a user lookup
    sender_name: String,
    receiver_id: UserId,
    body: String,
    read: bool,
    sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(
        sender_id: UserId,
        sender_name: impl Into<String>,
        receiver_id: UserId,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: ChatMessageId::generate(),
            sender_id,
            sender_name: sender_name.into(),
            receiver_id,
            body: body.into(),
            read: false,
            sent_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &ChatMessageId {
        &self.id
    }

    pub fn sender_id(&self) -> &UserId {
        &self.sender_id
    }

    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    pub fn receiver_id(&self) -> &UserId {
        &self.receiver_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// True when the message travels between exactly these two accounts,
    /// in either direction
    pub fn is_between(&self, a: &UserId, b: &UserId) -> bool {
        (&self.sender_id == a && &self.receiver_id == b)
            || (&self.sender_id == b && &self.receiver_id == a)
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

impl StorageEntity for ChatMessage {
    type Key = ChatMessageId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let sender = UserId::generate();
        let receiver = UserId::generate();
        let message = ChatMessage::new(sender.clone(), "Asha", receiver.clone(), "Hello!");

        assert_eq!(message.body(), "Hello!");
        assert!(!message.is_read());
        assert!(message.is_between(&sender, &receiver));
        assert!(message.is_between(&receiver, &sender));
    }

    #[test]
    fn test_is_between_rejects_third_party() {
        let sender = UserId::generate();
        let receiver = UserId::generate();
        let message = ChatMessage::new(sender.clone(), "Asha", receiver, "Hello!");

        assert!(!message.is_between(&sender, &UserId::generate()));
    }

    #[test]
    fn test_mark_read() {
        let mut message = ChatMessage::new(
            UserId::generate(),
            "Asha",
            UserId::generate(),
            "Hello!",
        );
        message.mark_read();
        assert!(message.is_read());
    }
}
