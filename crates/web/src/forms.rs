//! Form field conversion
//!
//! Forms arrive as strings. These helpers turn them into domain values, recording a field
//! error instead of failing so every problem in a submission is reported at once.

use billable::validation::FieldErrors;
use jiff::civil::Date;

/// Trimmed text, `None` when nothing but whitespace was submitted.
pub(crate) fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();

    (!value.is_empty()).then(|| value.to_string())
}

/// Unchecked checkboxes are not submitted at all.
pub(crate) fn checkbox(value: Option<&str>) -> bool {
    value.is_some()
}

/// Required number. Records "`label` must be a number" and returns `None` on failure.
pub(crate) fn number(errors: &mut FieldErrors, field: &str, label: &str, raw: &str) -> Option<f64> {
    let parsed = raw.trim().parse::<f64>().ok().filter(|value| value.is_finite());

    errors.check(parsed.is_some(), field, format!("{label} must be a number"));

    parsed
}

/// Optional number: blank is `Ok(None)`, anything else must parse.
pub(crate) fn optional_number(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    raw: &str,
) -> Option<f64> {
    if raw.trim().is_empty() {
        return None;
    }

    number(errors, field, label, raw)
}

/// Required `YYYY-MM-DD` date.
pub(crate) fn date(errors: &mut FieldErrors, field: &str, label: &str, raw: &str) -> Option<Date> {
    let parsed = raw.trim().parse::<Date>().ok();

    errors.check(
        parsed.is_some(),
        field,
        format!("{label} must be a date (YYYY-MM-DD)"),
    );

    parsed
}

/// Optional `YYYY-MM-DD` date.
pub(crate) fn optional_date(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    raw: &str,
) -> Option<Date> {
    if raw.trim().is_empty() {
        return None;
    }

    date(errors, field, label, raw)
}

/// Text for an optional stored value.
pub(crate) fn text_or_blank(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

/// Number as typed back into a form field.
pub(crate) fn number_text(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use jiff::civil;

    use super::*;

    #[test]
    fn blank_text_is_none() {
        assert_eq!(optional_text("   "), None);
        assert_eq!(optional_text(" a@b.c "), Some("a@b.c".to_string()));
    }

    #[test]
    fn numbers_report_parse_failures_against_the_field() {
        let mut errors = FieldErrors::new();

        assert_eq!(number(&mut errors, "rate", "Rate", " 12.5 "), Some(12.5));
        assert!(errors.is_valid());

        assert_eq!(number(&mut errors, "rate", "Rate", "twelve"), None);
        assert_eq!(errors.get("rate"), Some("Rate must be a number"));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let mut errors = FieldErrors::new();

        assert_eq!(number(&mut errors, "rate", "Rate", "NaN"), None);
        assert_eq!(number(&mut errors, "hours", "Hours", "inf"), None);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn optional_fields_accept_blank_input() {
        let mut errors = FieldErrors::new();

        assert_eq!(optional_number(&mut errors, "discount", "Discount", ""), None);
        assert_eq!(optional_date(&mut errors, "date_paid", "Date paid", " "), None);
        assert!(errors.is_valid());

        assert_eq!(optional_number(&mut errors, "discount", "Discount", "x"), None);
        assert!(!errors.is_valid());
    }

    #[test]
    fn dates_use_iso_format() {
        let mut errors = FieldErrors::new();

        assert_eq!(
            date(&mut errors, "work_date", "Work date", "2026-03-02"),
            Some(civil::date(2026, 3, 2))
        );
        assert_eq!(date(&mut errors, "work_date", "Work date", "02/03/2026"), None);
        assert_eq!(
            errors.get("work_date"),
            Some("Work date must be a date (YYYY-MM-DD)")
        );
    }

    #[test]
    fn checkbox_is_checked_when_present() {
        assert!(checkbox(Some("on")));
        assert!(!checkbox(None));
    }
}
