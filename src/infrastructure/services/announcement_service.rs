//! Announcement service - administrator broadcasts

use std::sync::Arc;

use crate::domain::announcement::{Announcement, AnnouncementId, AnnouncementScope};
use crate::domain::storage::Storage;
use crate::domain::DomainError;
use crate::infrastructure::notify::{ChangeFeed, Collection};

#[derive(Debug)]
pub struct AnnouncementService {
    announcements: Arc<dyn Storage<Announcement>>,
    feed: Arc<ChangeFeed>,
}

impl AnnouncementService {
    pub fn new(announcements: Arc<dyn Storage<Announcement>>, feed: Arc<ChangeFeed>) -> Self {
        Self {
            announcements,
            feed,
        }
    }

    pub async fn create(
        &self,
        scope: AnnouncementScope,
        message: impl Into<String>,
    ) -> Result<Announcement, DomainError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(DomainError::validation("Announcement cannot be empty"));
        }

        let announcement = self
            .announcements
            .create(Announcement::new(scope, message))
            .await?;
        self.feed.publish(Collection::Announcements);
        Ok(announcement)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let deleted = self
            .announcements
            .delete(&AnnouncementId::from_string(id))
            .await?;
        if deleted {
            self.feed.publish(Collection::Announcements);
        }
        Ok(deleted)
    }

    /// Everything, newest first (admin and participant views)
    pub async fn list(&self) -> Result<Vec<Announcement>, DomainError> {
        let mut announcements = self.announcements.list().await?;
        announcements.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(announcements)
    }

    /// Only announcements addressed to everyone (logged-out visitors)
    pub async fn list_public(&self) -> Result<Vec<Announcement>, DomainError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|a| a.scope() == AnnouncementScope::All)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    fn service() -> AnnouncementService {
        AnnouncementService::new(Arc::new(InMemoryStorage::new()), Arc::new(ChangeFeed::new()))
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let service = service();
        service
            .create(AnnouncementScope::Participant, "Scores updated")
            .await
            .unwrap();
        service
            .create(AnnouncementScope::All, "Season 4 registration open")
            .await
            .unwrap();

        let all = service.list().await.unwrap();
        assert_eq!(all.len(), 2);
        // newest first
        assert_eq!(all[0].message(), "Season 4 registration open");
    }

    #[tokio::test]
    async fn test_create_empty_rejected() {
        let service = service();
        let result = service.create(AnnouncementScope::All, "   ").await;
        assert!(matches!(
            result.unwrap_err(),
            DomainError::Validation { .. }
        ));
    }

    #[tokio::test]
    async fn test_public_list_filters_scope() {
        let service = service();
        service
            .create(AnnouncementScope::Participant, "Members only")
            .await
            .unwrap();
        service
            .create(AnnouncementScope::All, "Everyone")
            .await
            .unwrap();

        let public = service.list_public().await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].message(), "Everyone");
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service();
        let announcement = service
            .create(AnnouncementScope::All, "Gone soon")
            .await
            .unwrap();

        assert!(service.delete(announcement.id().as_str()).await.unwrap());
        assert!(!service.delete(announcement.id().as_str()).await.unwrap());
        assert!(service.list().await.unwrap().is_empty());
    }
}
