//! Settings service.

use async_trait::async_trait;
use billable::settings::{RawSetting, SettingValue, SettingsMap};
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::settings::{
        errors::SettingsServiceError, records::SettingRecord, repository::PgSettingsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgSettingsService {
    db: Db,
    repository: PgSettingsRepository,
}

impl PgSettingsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSettingsRepository::new(),
        }
    }
}

#[async_trait]
impl SettingsService for PgSettingsService {
    async fn list_settings(&self) -> Result<Vec<SettingRecord>, SettingsServiceError> {
        let mut tx = self.db.begin().await?;

        let settings = self.repository.list_settings(&mut tx).await?;

        tx.commit().await?;

        Ok(settings)
    }

    async fn get_value(&self, key: &str) -> Result<RawSetting, SettingsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_setting(&mut tx, key).await?;

        tx.commit().await?;

        Ok(record.raw())
    }

    async fn get_all(&self, defaults: &SettingsMap) -> Result<SettingsMap, SettingsServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self.repository.list_settings(&mut tx).await?;

        tx.commit().await?;

        let mut settings = SettingsMap::new();

        for record in records {
            match record.raw().typed() {
                Ok(value) => settings.insert(record.key, value),
                Err(error) => {
                    warn!(key = %record.key, %error, "skipping unreadable setting");
                }
            }
        }

        Ok(settings.with_defaults(defaults))
    }

    #[tracing::instrument(
        name = "settings.service.update_value",
        skip(self, value),
        fields(key = %key),
        err
    )]
    async fn update_value(
        &self,
        key: &str,
        value: &str,
    ) -> Result<SettingValue, SettingsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_setting(&mut tx, key).await?;

        let typed = RawSetting::new(value, record.data_type)
            .typed()
            .map_err(SettingsServiceError::InvalidValue)?;

        self.repository.update_setting(&mut tx, key, value).await?;

        tx.commit().await?;

        info!(data_type = %record.data_type, "updated setting");

        Ok(typed)
    }
}

#[automock]
#[async_trait]
pub trait SettingsService: Send + Sync {
    /// Retrieve every stored setting, ordered by key.
    async fn list_settings(&self) -> Result<Vec<SettingRecord>, SettingsServiceError>;

    /// Retrieve one setting's stored value and declared type.
    async fn get_value(&self, key: &str) -> Result<RawSetting, SettingsServiceError>;

    /// Retrieve every readable setting as a typed value, falling back to `defaults` for
    /// missing or unreadable keys.
    async fn get_all(&self, defaults: &SettingsMap) -> Result<SettingsMap, SettingsServiceError>;

    /// Store a new value for an existing setting after checking it against the declared type.
    async fn update_value(
        &self,
        key: &str,
        value: &str,
    ) -> Result<SettingValue, SettingsServiceError>;
}
