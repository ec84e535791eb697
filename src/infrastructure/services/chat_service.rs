//! Chat service - direct messages between participants and the administrator

use std::sync::Arc;

use crate::domain::chat::ChatMessage;
use crate::domain::storage::Storage;
use crate::domain::user::{User, UserId, UserRole};
use crate::domain::DomainError;
use crate::infrastructure::notify::{ChangeFeed, Collection};

#[derive(Debug)]
pub struct ChatService {
    messages: Arc<dyn Storage<ChatMessage>>,
    users: Arc<dyn Storage<User>>,
    feed: Arc<ChangeFeed>,
}

impl ChatService {
    pub fn new(
        messages: Arc<dyn Storage<ChatMessage>>,
        users: Arc<dyn Storage<User>>,
        feed: Arc<ChangeFeed>,
    ) -> Self {
        Self {
            messages,
            users,
            feed,
        }
    }

    /// The administrator account participants write to (the earliest one,
    /// if several exist)
    pub async fn admin_contact(&self) -> Result<User, DomainError> {
        let mut admins: Vec<User> = self
            .users
            .list()
            .await?
            .into_iter()
            .filter(|user| user.role() == UserRole::Admin)
            .collect();
        admins.sort_by(|a, b| a.created_at().cmp(&b.created_at()));
        admins
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found("No administrator account exists"))
    }

    /// Send a message. Participants may only write to an administrator;
    /// administrators may write to anyone.
    pub async fn send(
        &self,
        sender: &User,
        receiver_id: &str,
        body: impl Into<String>,
    ) -> Result<ChatMessage, DomainError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(DomainError::validation("Message cannot be empty"));
        }

        let receiver = self
            .users
            .get(&UserId::from_string(receiver_id))
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", receiver_id)))?;

        if !sender.is_admin() && !receiver.is_admin() {
            return Err(DomainError::forbidden(
                "Participants can only message the administrator",
            ));
        }

        let message = ChatMessage::new(
            sender.id().clone(),
            sender.full_name(),
            receiver.id().clone(),
            body,
        );

        let message = self.messages.create(message).await?;
        self.feed.publish(Collection::ChatMessages);
        Ok(message)
    }

    /// Both directions of one conversation, oldest first
    pub async fn conversation(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> Result<Vec<ChatMessage>, DomainError> {
        let mut messages: Vec<ChatMessage> = self
            .messages
            .list()
            .await?
            .into_iter()
            .filter(|message| message.is_between(a, b))
            .collect();
        messages.sort_by(|x, y| x.sent_at().cmp(&y.sent_at()));
        Ok(messages)
    }

    /// Mark everything the other side sent to the reader as read; returns
    /// how many messages changed
    pub async fn mark_conversation_read(
        &self,
        reader: &UserId,
        other: &UserId,
    ) -> Result<usize, DomainError> {
        let unread: Vec<ChatMessage> = self
            .messages
            .list()
            .await?
            .into_iter()
            .filter(|message| {
                message.receiver_id() == reader
                    && message.sender_id() == other
                    && !message.is_read()
            })
            .collect();

        let count = unread.len();
        for mut message in unread {
            message.mark_read();
            self.messages.update(message).await?;
        }
        if count > 0 {
            self.feed.publish(Collection::ChatMessages);
        }
        Ok(count)
    }

    /// Messages waiting for the given account
    pub async fn unread_count(&self, reader: &UserId) -> Result<usize, DomainError> {
        Ok(self
            .messages
            .list()
            .await?
            .iter()
            .filter(|message| message.receiver_id() == reader && !message.is_read())
            .count())
    }
}
