//! Setting Records

use billable::settings::{RawSetting, SettingType};
use jiff::Timestamp;

/// A stored setting row.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingRecord {
    pub key: String,
    pub value: String,
    pub data_type: SettingType,
    pub description: String,
    pub updated_at: Timestamp,
}

impl SettingRecord {
    /// The stored value paired with its declared type.
    #[must_use]
    pub fn raw(&self) -> RawSetting {
        RawSetting::new(self.value.clone(), self.data_type)
    }
}
