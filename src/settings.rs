//! Settings
//!
//! Settings are stored as text next to a declared data type. [`RawSetting`] pairs the two and
//! offers typed access; [`SettingsMap`] is the bulk, already-typed view used when rendering.

use std::{collections::BTreeMap, fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Errors raised by typed settings access.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingError {
    /// The declared type does not match the requested conversion.
    #[error("setting is declared as {actual}, not {expected}")]
    TypeMismatch {
        /// Type the caller asked for.
        expected: SettingType,
        /// Type the setting is declared with.
        actual: SettingType,
    },

    /// The stored value cannot be read as its declared type.
    #[error("value {value:?} is not a valid {data_type}")]
    Parse {
        /// Declared type.
        data_type: SettingType,
        /// Offending stored value.
        value: String,
    },

    /// Unknown data type name.
    #[error("unknown setting type {0:?}")]
    UnknownType(String),
}

/// Declared data type of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    /// Free text.
    String,
    /// Signed 64-bit integer.
    Int,
    /// Floating point number.
    Float,
    /// Exact decimal number.
    Decimal,
    /// Boolean flag.
    Bool,
}

impl SettingType {
    /// Name used in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingType {
    type Err = SettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(Self::String),
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "decimal" => Ok(Self::Decimal),
            "bool" => Ok(Self::Bool),
            other => Err(SettingError::UnknownType(other.to_string())),
        }
    }
}

/// A typed setting value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Text value.
    String(String),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Decimal value.
    Decimal(Decimal),
    /// Boolean value.
    Bool(bool),
}

impl SettingValue {
    /// Declared type matching this value.
    #[must_use]
    pub const fn data_type(&self) -> SettingType {
        match self {
            Self::String(_) => SettingType::String,
            Self::Int(_) => SettingType::Int,
            Self::Float(_) => SettingType::Float,
            Self::Decimal(_) => SettingType::Decimal,
            Self::Bool(_) => SettingType::Bool,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// A stored value together with its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSetting {
    value: String,
    data_type: SettingType,
}

impl RawSetting {
    /// Pair a stored value with its declared type.
    #[must_use]
    pub fn new(value: impl Into<String>, data_type: SettingType) -> Self {
        Self {
            value: value.into(),
            data_type,
        }
    }

    /// The stored text, whatever the declared type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Declared type.
    #[must_use]
    pub const fn data_type(&self) -> SettingType {
        self.data_type
    }

    /// Read as an integer.
    ///
    /// # Errors
    ///
    /// [`SettingError::TypeMismatch`] unless declared `int`; [`SettingError::Parse`] when the
    /// stored text is not an integer.
    pub fn as_int(&self) -> Result<i64, SettingError> {
        self.expect_type(SettingType::Int)?;

        self.value.trim().parse().map_err(|_parse| self.parse_error())
    }

    /// Read as a float.
    ///
    /// # Errors
    ///
    /// [`SettingError::TypeMismatch`] unless declared `float`; [`SettingError::Parse`] when
    /// the stored text is not a finite number.
    pub fn as_float(&self) -> Result<f64, SettingError> {
        self.expect_type(SettingType::Float)?;

        self.value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| self.parse_error())
    }

    /// Read as a decimal.
    ///
    /// # Errors
    ///
    /// [`SettingError::TypeMismatch`] unless declared `decimal`; [`SettingError::Parse`] when
    /// the stored text is not a decimal number.
    pub fn as_decimal(&self) -> Result<Decimal, SettingError> {
        self.expect_type(SettingType::Decimal)?;

        Decimal::from_str(self.value.trim()).map_err(|_parse| self.parse_error())
    }

    /// Read as a boolean.
    ///
    /// # Errors
    ///
    /// [`SettingError::TypeMismatch`] unless declared `bool`; [`SettingError::Parse`] for
    /// anything but `true/false/1/0/yes/no/on/off`.
    pub fn as_bool(&self) -> Result<bool, SettingError> {
        self.expect_type(SettingType::Bool)?;

        parse_bool(&self.value).ok_or_else(|| self.parse_error())
    }

    /// Convert into the typed value matching the declared type.
    ///
    /// # Errors
    ///
    /// [`SettingError::Parse`] when the stored text does not match the declared type.
    pub fn typed(&self) -> Result<SettingValue, SettingError> {
        Ok(match self.data_type {
            SettingType::String => SettingValue::String(self.value.clone()),
            SettingType::Int => SettingValue::Int(self.as_int()?),
            SettingType::Float => SettingValue::Float(self.as_float()?),
            SettingType::Decimal => SettingValue::Decimal(self.as_decimal()?),
            SettingType::Bool => SettingValue::Bool(self.as_bool()?),
        })
    }

    fn expect_type(&self, expected: SettingType) -> Result<(), SettingError> {
        if self.data_type == expected {
            Ok(())
        } else {
            Err(SettingError::TypeMismatch {
                expected,
                actual: self.data_type,
            })
        }
    }

    fn parse_error(&self) -> SettingError {
        SettingError::Parse {
            data_type: self.data_type,
            value: self.value.clone(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Every setting as a typed value, keyed by setting key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SettingsMap(BTreeMap<String, SettingValue>);

impl SettingsMap {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: SettingValue) {
        self.0.insert(key.into(), value);
    }

    /// Builder form of [`SettingsMap::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: SettingValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Fill any key missing from `self` with the value from `defaults`.
    #[must_use]
    pub fn with_defaults(mut self, defaults: &SettingsMap) -> Self {
        for (key, value) in &defaults.0 {
            self.0
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }

        self
    }

    /// Value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    /// Text value under `key`, or `fallback` when absent or not a string.
    #[must_use]
    pub fn string_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        match self.0.get(key) {
            Some(SettingValue::String(value)) => value,
            _ => fallback,
        }
    }

    /// Integer under `key`, or `fallback`.
    #[must_use]
    pub fn int_or(&self, key: &str, fallback: i64) -> i64 {
        match self.0.get(key) {
            Some(SettingValue::Int(value)) => *value,
            _ => fallback,
        }
    }

    /// Float under `key`, or `fallback`. Decimal and integer values are widened.
    #[must_use]
    pub fn float_or(&self, key: &str, fallback: f64) -> f64 {
        use rust_decimal::prelude::ToPrimitive;

        match self.0.get(key) {
            Some(SettingValue::Float(value)) => *value,
            Some(SettingValue::Decimal(value)) => value.to_f64().unwrap_or(fallback),
            #[expect(clippy::cast_precision_loss, reason = "settings integers are small")]
            Some(SettingValue::Int(value)) => *value as f64,
            _ => fallback,
        }
    }

    /// Decimal under `key`, or `fallback`.
    #[must_use]
    pub fn decimal_or(&self, key: &str, fallback: Decimal) -> Decimal {
        match self.0.get(key) {
            Some(SettingValue::Decimal(value)) => *value,
            _ => fallback,
        }
    }

    /// Boolean under `key`, or `fallback`.
    #[must_use]
    pub fn bool_or(&self, key: &str, fallback: bool) -> bool {
        match self.0.get(key) {
            Some(SettingValue::Bool(value)) => *value,
            _ => fallback,
        }
    }

    /// Number of settings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, SettingValue)> for SettingsMap {
    fn from_iter<T: IntoIterator<Item = (String, SettingValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
