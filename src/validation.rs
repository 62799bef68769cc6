//! Validation
//!
//! Field-level checks for submitted forms. A form is validated into a [`FieldErrors`] value
//! which is then handed back to the caller next to the form data; nothing is shared or
//! mutated behind the caller's back.

use std::collections::BTreeMap;

use serde::Serialize;

/// Validation outcome for a single form: the first failure message recorded per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// An empty set of errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` when `ok` is false.
    ///
    /// Only the first failure for a field is kept; later failures for the same field are
    /// ignored.
    pub fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) {
        if !ok {
            self.insert_if_absent(field, message);
        }
    }

    /// Record `message` against `field` unless the field already has an error.
    pub fn insert_if_absent(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Whether no field errors were recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    /// Error recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Number of fields with an error.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty. Same as [`FieldErrors::is_valid`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// `Ok(())` when valid, otherwise the errors themselves.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_valid() { Ok(()) } else { Err(self) }
    }
}

/// True when the string contains something other than whitespace.
#[must_use]
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True when the string has at most `max` characters (not bytes).
#[must_use]
pub fn max_chars(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

/// True when `value` is one of `allowed`.
#[must_use]
pub fn permitted_value<T: PartialEq>(value: &T, allowed: &[T]) -> bool {
    allowed.contains(value)
}

/// True for finite numbers that are zero or greater.
#[must_use]
pub fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// True for finite numbers within `min..=max`.
#[must_use]
pub fn in_range(value: f64, min: f64, max: f64) -> bool {
    value.is_finite() && (min..=max).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_failure_per_field_wins() {
        let mut errors = FieldErrors::new();

        errors.check(false, "name", "first");
        errors.check(false, "name", "second");
        errors.check(true, "email", "never recorded");

        assert_eq!(errors.get("name"), Some("first"));
        assert_eq!(errors.get("email"), None);
        assert_eq!(errors.len(), 1);
        assert!(!errors.is_valid());
    }

    #[test]
    fn passing_checks_leave_errors_valid() {
        let mut errors = FieldErrors::new();

        errors.check(not_blank("Acme"), "name", "Name cannot be blank");
        errors.check(max_chars("Acme", 255), "name", "too long");

        assert!(errors.is_valid());
        assert_eq!(errors.into_result(), Ok(()));
    }

    #[test]
    fn not_blank_trims_whitespace() {
        assert!(not_blank(" a "));
        assert!(!not_blank(""));
        assert!(!not_blank(" \t\n"));
    }

    #[test]
    fn max_chars_counts_characters_not_bytes() {
        let accented = "é".repeat(255);

        assert!(accented.len() > 255);
        assert!(max_chars(&accented, 255));
        assert!(!max_chars(&"a".repeat(256), 255));
        assert!(max_chars("", 0));
    }

    #[test]
    fn permitted_value_checks_membership() {
        assert!(permitted_value(&"Complete", &["Estimating", "Complete"]));
        assert!(!permitted_value(&"Done", &["Estimating", "Complete"]));
        assert!(!permitted_value(&1, &[]));
    }

    #[test]
    fn numeric_predicates_reject_non_finite_values() {
        assert!(is_non_negative(0.0));
        assert!(!is_non_negative(-0.5));
        assert!(!is_non_negative(f64::NAN));
        assert!(in_range(100.0, 0.0, 100.0));
        assert!(!in_range(100.5, 0.0, 100.0));
        assert!(!in_range(f64::INFINITY, 0.0, 100.0));
    }

    #[test]
    fn iterates_in_field_order() {
        let mut errors = FieldErrors::new();

        errors.check(false, "rate", "Rate must be a number");
        errors.check(false, "name", "Name cannot be blank");

        let pairs: Vec<(&str, &str)> = errors.iter().collect();

        assert_eq!(
            pairs,
            vec![
                ("name", "Name cannot be blank"),
                ("rate", "Rate must be a number")
            ]
        );
    }
}
