//! Settings Views

use serde::Serialize;

use billable_app::domain::settings::records::SettingRecord;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SettingView {
    pub(crate) key: String,
    pub(crate) value: String,
    pub(crate) data_type: &'static str,
    pub(crate) description: String,
    pub(crate) updated_at: String,
}

impl From<&SettingRecord> for SettingView {
    fn from(record: &SettingRecord) -> Self {
        Self {
            key: record.key.clone(),
            value: record.value.clone(),
            data_type: record.data_type.as_str(),
            description: record.description.clone(),
            updated_at: record.updated_at.strftime("%Y-%m-%d %H:%M").to_string(),
        }
    }
}
