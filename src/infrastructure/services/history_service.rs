//! Season history service - the league's hall of fame

use std::sync::Arc;

use crate::domain::history::{SeasonRecord, SeasonRecordId};
use crate::domain::storage::Storage;
use crate::domain::DomainError;
use crate::infrastructure::notify::{ChangeFeed, Collection};

/// Request to add or replace a season record
#[derive(Debug, Clone)]
pub struct SeasonRecordRequest {
    pub season_number: u32,
    pub event_name: String,
    pub champion_name: String,
    pub champion_team_name: String,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub struct HistoryService {
    records: Arc<dyn Storage<SeasonRecord>>,
    feed: Arc<ChangeFeed>,
}

impl HistoryService {
    pub fn new(records: Arc<dyn Storage<SeasonRecord>>, feed: Arc<ChangeFeed>) -> Self {
        Self { records, feed }
    }

    /// All seasons, earliest first
    pub async fn list(&self) -> Result<Vec<SeasonRecord>, DomainError> {
        let mut records = self.records.list().await?;
        records.sort_by_key(|record| record.season_number());
        Ok(records)
    }

    pub async fn add(&self, request: SeasonRecordRequest) -> Result<SeasonRecord, DomainError> {
        let mut record = SeasonRecord::new(
            request.season_number,
            request.event_name,
            request.champion_name,
            request.champion_team_name,
        );
        if let Some(notes) = request.notes {
            record = record.with_notes(notes);
        }

        let record = self.records.create(record).await?;
        self.feed.publish(Collection::SeasonHistory);
        Ok(record)
    }

    pub async fn update(
        &self,
        id: &str,
        request: SeasonRecordRequest,
    ) -> Result<SeasonRecord, DomainError> {
        let mut record = self
            .records
            .get(&SeasonRecordId::from_string(id))
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Season record '{}' not found", id))
            })?;

        record.set_details(
            request.season_number,
            request.event_name,
            request.champion_name,
            request.champion_team_name,
            request.notes,
        );

        let record = self.records.update(record).await?;
        self.feed.publish(Collection::SeasonHistory);
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let deleted = self
            .records
            .delete(&SeasonRecordId::from_string(id))
            .await?;
        if deleted {
            self.feed.publish(Collection::SeasonHistory);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    fn service() -> HistoryService {
        HistoryService::new(Arc::new(InMemoryStorage::new()), Arc::new(ChangeFeed::new()))
    }

    fn request(season: u32, champion: &str) -> SeasonRecordRequest {
        SeasonRecordRequest {
            season_number: season,
            event_name: format!("Season {} Cup", season),
            champion_name: champion.to_string(),
            champion_team_name: format!("{}'s XI", champion),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_season() {
        let service = service();
        service.add(request(3, "Asha")).await.unwrap();
        service.add(request(1, "Bashir")).await.unwrap();
        service.add(request(2, "Chitra")).await.unwrap();

        let records = service.list().await.unwrap();
        let seasons: Vec<u32> = records.iter().map(|r| r.season_number()).collect();
        assert_eq!(seasons, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update() {
        let service = service();
        let record = service.add(request(1, "Asha")).await.unwrap();

        let mut changed = request(1, "Asha Rahman");
        changed.notes = Some("Won on net run rate".to_string());
        let updated = service
            .update(record.id().as_str(), changed)
            .await
            .unwrap();

        assert_eq!(updated.champion_name(), "Asha Rahman");
        assert_eq!(updated.notes(), Some("Won on net run rate"));
    }

    #[tokio::test]
    async fn test_update_missing() {
        let service = service();
        let result = service.update("missing", request(1, "Asha")).await;
        assert!(matches!(result.unwrap_err(), DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service();
        let record = service.add(request(1, "Asha")).await.unwrap();

        assert!(service.delete(record.id().as_str()).await.unwrap());
        assert!(service.list().await.unwrap().is_empty());
    }
}
