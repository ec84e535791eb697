//! Site settings service - the administrator's global toggles

use std::sync::Arc;

use crate::domain::settings::{SettingsKey, SiteSettings};
use crate::domain::storage::Storage;
use crate::domain::DomainError;
use crate::infrastructure::notify::{ChangeFeed, Collection};

#[derive(Debug)]
pub struct SettingsService {
    settings: Arc<dyn Storage<SiteSettings>>,
    feed: Arc<ChangeFeed>,
}

impl SettingsService {
    pub fn new(settings: Arc<dyn Storage<SiteSettings>>, feed: Arc<ChangeFeed>) -> Self {
        Self { settings, feed }
    }

    /// Current settings; defaults apply until the administrator saves any
    pub async fn get(&self) -> Result<SiteSettings, DomainError> {
        Ok(self
            .settings
            .get(&SettingsKey::singleton())
            .await?
            .unwrap_or_default())
    }

    pub async fn set_show_participant_teams(
        &self,
        show: bool,
    ) -> Result<SiteSettings, DomainError> {
        let mut settings = self.get().await?;
        settings.set_show_participant_teams(show);

        let settings = self.settings.save(settings).await?;
        self.feed.publish(Collection::SiteSettings);
        Ok(settings)
    }
}
