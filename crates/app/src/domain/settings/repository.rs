//! Settings Repository

use billable::settings::SettingType;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::settings::records::SettingRecord;

const LIST_SETTINGS_SQL: &str = include_str!("sql/list_settings.sql");
const GET_SETTING_SQL: &str = include_str!("sql/get_setting.sql");
const UPDATE_SETTING_SQL: &str = include_str!("sql/update_setting.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSettingsRepository;

impl PgSettingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_settings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<SettingRecord>, sqlx::Error> {
        query_as::<Postgres, SettingRecord>(LIST_SETTINGS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_setting(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
    ) -> Result<SettingRecord, sqlx::Error> {
        query_as::<Postgres, SettingRecord>(GET_SETTING_SQL)
            .bind(key)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_setting(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
        value: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_SETTING_SQL)
            .bind(key)
            .bind(value)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for SettingRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let data_type: String = row.try_get("data_type")?;

        let data_type = data_type
            .parse::<SettingType>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "data_type".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            key: row.try_get("key")?,
            value: row.try_get("value")?,
            data_type,
            description: row.try_get("description")?,
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
