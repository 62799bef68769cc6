//! Setting Form

use billable::settings::{SettingError, SettingType};
use serde::{Deserialize, Serialize};

/// A single setting edit. The value is checked against the declared type on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SettingForm {
    pub(crate) key: String,
    pub(crate) value: String,
}

/// Field message for a value the declared type rejected.
pub(crate) fn value_message(data_type: SettingType, error: &SettingError) -> String {
    match error {
        SettingError::Parse { .. } => match data_type {
            SettingType::String => "Value must be text".to_string(),
            SettingType::Int => "Value must be a whole number".to_string(),
            SettingType::Float | SettingType::Decimal => "Value must be a number".to_string(),
            SettingType::Bool => "Value must be true or false".to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failures_name_the_expected_kind() {
        let error = SettingError::Parse {
            data_type: SettingType::Int,
            value: "two".to_string(),
        };

        assert_eq!(
            value_message(SettingType::Int, &error),
            "Value must be a whole number"
        );
        assert_eq!(
            value_message(SettingType::Bool, &error),
            "Value must be true or false"
        );
    }
}
