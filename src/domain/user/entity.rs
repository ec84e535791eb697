//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_email, validate_full_name, UserValidationError};
use crate::domain::storage::{StorageEntity, StorageKey};

/// User identifier (UUID assigned at registration)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
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

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for UserId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// League administrator: manages events, scores and replacement reviews
    Admin,
    /// Regular participant
    #[default]
    Participant,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Participant => write!(f, "participant"),
        }
    }
}

/// An account in the league
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    full_name: String,
    /// Login identifier, stored lowercased
    email: String,
    /// Optional social profile link shown to the administrator
    #[serde(skip_serializing_if = "Option::is_none")]
    social_link: Option<String>,
    role: UserRole,
    password_hash: String,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
        password_hash: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let full_name = full_name.into();
        validate_full_name(&full_name)?;
        let email = email.into().to_lowercase();
        validate_email(&email)?;

        Ok(Self {
            id: UserId::generate(),
            full_name,
            email,
            social_link: None,
            role,
            password_hash: password_hash.into(),
            created_at: Utc::now(),
            last_login_at: None,
        })
    }

    pub fn with_social_link(mut self, link: impl Into<String>) -> Self {
        self.social_link = Some(link.into());
        self
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn social_link(&self) -> Option<&str> {
        self.social_link.as_deref()
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    // Mutators

    pub fn set_profile(
        &mut self,
        full_name: impl Into<String>,
        social_link: Option<String>,
    ) -> Result<(), UserValidationError> {
        let full_name = full_name.into();
        validate_full_name(&full_name)?;
        self.full_name = full_name;
        self.social_link = social_link;
        Ok(())
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
    }

    pub fn set_password_hash(&mut self, hash: impl Into<String>) {
        self.password_hash = hash.into();
    }

    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
    }
}

impl StorageEntity for User {
    type Key = UserId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "Asha Rahman",
            "Asha@Example.com",
            UserRole::Participant,
            "argon2-hash",
        )
        .unwrap()
    }

    #[test]
    fn test_user_creation_lowercases_email() {
        let user = sample_user();

        assert_eq!(user.email(), "asha@example.com");
        assert_eq!(user.full_name(), "Asha Rahman");
        assert!(!user.is_admin());
        assert!(user.last_login_at().is_none());
    }

    #[test]
    fn test_user_invalid_email_rejected() {
        let result = User::new("Asha", "not-an-email", UserRole::Participant, "h");
        assert_eq!(result.unwrap_err(), UserValidationError::InvalidEmail);
    }

    #[test]
    fn test_user_social_link() {
        let user = sample_user().with_social_link("https://facebook.com/asha");
        assert_eq!(user.social_link(), Some("https://facebook.com/asha"));
    }

    #[test]
    fn test_record_login() {
        let mut user = sample_user();
        user.record_login();
        assert!(user.last_login_at().is_some());
    }

    #[test]
    fn test_set_profile() {
        let mut user = sample_user();
        user.set_profile("New Name", None).unwrap();

        assert_eq!(user.full_name(), "New Name");
        assert!(user.social_link().is_none());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(
            serde_json::to_string(&UserRole::Admin).unwrap(),
            "\"admin\""
        );
        assert_eq!(
            serde_json::to_string(&UserRole::Participant).unwrap(),
            "\"participant\""
        );
    }
}
