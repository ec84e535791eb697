//! User service - registration, authentication and profile management

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::storage::Storage;
use crate::domain::user::{validate_password, User, UserId, UserRole};
use crate::domain::DomainError;
use crate::infrastructure::auth::PasswordHasher;
use crate::infrastructure::notify::{ChangeFeed, Collection};

/// Request to register an account
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub social_link: Option<String>,
}

/// Request to update an account (admin edit; role changes included)
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub social_link: Option<Option<String>>,
    pub role: Option<UserRole>,
}

#[derive(Debug)]
pub struct UserService {
    users: Arc<dyn Storage<User>>,
    hasher: Arc<dyn PasswordHasher>,
    feed: Arc<ChangeFeed>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn Storage<User>>,
        hasher: Arc<dyn PasswordHasher>,
        feed: Arc<ChangeFeed>,
    ) -> Self {
        Self {
            users,
            hasher,
            feed,
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        self.users.get(&UserId::from_string(id)).await
    }

    pub async fn get_required(&self, id: &str) -> Result<User, DomainError> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email = email.to_lowercase();
        Ok(self
            .users
            .list()
            .await?
            .into_iter()
            .find(|user| user.email() == email))
    }

    /// All accounts, newest first (admin view)
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        let mut users = self.users.list().await?;
        users.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(users)
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.users.count().await
    }

    /// Register a participant account
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        self.create_with_role(request, UserRole::Participant).await
    }

    /// Create an account with an explicit role (admin seeding)
    pub async fn create_with_role(
        &self,
        request: RegisterUserRequest,
        role: UserRole,
    ) -> Result<User, DomainError> {
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self.find_by_email(&request.email).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "An account with email '{}' already exists",
                request.email.to_lowercase()
            )));
        }

        let hash = self.hasher.hash(&request.password)?;
        let mut user = User::new(request.full_name, request.email, role, hash)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        if let Some(link) = request.social_link {
            user = user.with_social_link(link);
        }

        let user = self.users.create(user).await?;
        info!(user_id = %user.id(), role = %user.role(), "Account registered");
        self.feed.publish(Collection::Users);
        Ok(user)
    }

    /// Verify credentials; a successful login is recorded on the account.
    /// Returns None for unknown email and wrong password alike.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let Some(mut user) = self.find_by_email(email).await? else {
            debug!("Login attempt for unknown email");
            return Ok(None);
        };

        if !self.hasher.verify(password, user.password_hash()) {
            debug!(user_id = %user.id(), "Login attempt with wrong password");
            return Ok(None);
        }

        user.record_login();
        let user = self.users.update(user).await?;
        Ok(Some(user))
    }

    /// Self-service profile edit
    pub async fn update_profile(
        &self,
        id: &str,
        full_name: String,
        social_link: Option<String>,
    ) -> Result<User, DomainError> {
        let mut user = self.get_required(id).await?;
        user.set_profile(full_name, social_link)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let user = self.users.update(user).await?;
        self.feed.publish(Collection::Users);
        Ok(user)
    }

    /// Self-service password change; the current password must verify
    pub async fn change_password(
        &self,
        id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        let mut user = self.get_required(id).await?;

        if !self.hasher.verify(current_password, user.password_hash()) {
            return Err(DomainError::credential("Current password is incorrect"));
        }
        validate_password(new_password).map_err(|e| DomainError::validation(e.to_string()))?;

        user.set_password_hash(self.hasher.hash(new_password)?);
        self.users.update(user).await?;
        Ok(())
    }

    /// Administrator edit of any account
    pub async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError> {
        let mut user = self.get_required(id).await?;

        if request.full_name.is_some() || request.social_link.is_some() {
            let name = request
                .full_name
                .unwrap_or_else(|| user.full_name().to_string());
            let link = match request.social_link {
                Some(link) => link,
                None => user.social_link().map(String::from),
            };
            user.set_profile(name, link)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }
        if let Some(role) = request.role {
            user.set_role(role);
        }

        let user = self.users.update(user).await?;
        self.feed.publish(Collection::Users);
        Ok(user)
    }
}
