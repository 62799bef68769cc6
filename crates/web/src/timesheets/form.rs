//! Timesheet Form

use billable::validation::{FieldErrors, is_non_negative};
use billable_app::domain::timesheets::data::TimesheetDetails;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::forms;

/// Submitted timesheet fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct TimesheetForm {
    pub(crate) work_date: String,
    pub(crate) hours_worked: String,
    pub(crate) hourly_rate: String,
    pub(crate) description: String,
}

impl TimesheetForm {
    /// New timesheet for `work_date` at the project's current rate.
    pub(crate) fn new(work_date: Date, hourly_rate: f64) -> Self {
        Self {
            work_date: work_date.to_string(),
            hourly_rate: forms::number_text(hourly_rate),
            ..Self::default()
        }
    }

    pub(crate) fn from_details(details: &TimesheetDetails) -> Self {
        Self {
            work_date: details.work_date.to_string(),
            hours_worked: forms::number_text(details.hours_worked),
            hourly_rate: forms::number_text(details.hourly_rate),
            description: forms::text_or_blank(details.description.as_ref()),
        }
    }

    pub(crate) fn validate(&self) -> Result<TimesheetDetails, FieldErrors> {
        let mut errors = FieldErrors::new();

        let work_date = forms::date(&mut errors, "work_date", "Work date", &self.work_date);

        let hours_worked = forms::number(
            &mut errors,
            "hours_worked",
            "Hours worked",
            &self.hours_worked,
        );

        if let Some(hours) = hours_worked {
            errors.check(
                is_non_negative(hours),
                "hours_worked",
                "Hours worked cannot be negative",
            );
        }

        let hourly_rate = forms::number(&mut errors, "hourly_rate", "Hourly rate", &self.hourly_rate);

        if let Some(rate) = hourly_rate {
            errors.check(
                is_non_negative(rate),
                "hourly_rate",
                "Hourly rate cannot be negative",
            );
        }

        match (work_date, hours_worked, hourly_rate) {
            (Some(work_date), Some(hours_worked), Some(hourly_rate)) if errors.is_valid() => {
                Ok(TimesheetDetails {
                    work_date,
                    hours_worked,
                    hourly_rate,
                    description: forms::optional_text(&self.description),
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_form_prefills_date_and_rate() {
        let form = TimesheetForm::new(date(2026, 3, 2), 100.0);

        assert_eq!(form.work_date, "2026-03-02");
        assert_eq!(form.hourly_rate, "100");
        assert_eq!(form.hours_worked, "");
    }

    #[test]
    fn valid_form_converts() -> TestResult {
        let form = TimesheetForm {
            hours_worked: "7.5".to_string(),
            description: "Code review".to_string(),
            ..TimesheetForm::new(date(2026, 3, 2), 100.0)
        };

        let details = form.validate().map_err(|errors| format!("{errors:?}"))?;

        assert_eq!(details.work_date, date(2026, 3, 2));
        assert!((details.hours_worked - 7.5).abs() < f64::EPSILON);
        assert_eq!(details.description.as_deref(), Some("Code review"));

        Ok(())
    }

    #[test]
    fn negative_hours_and_bad_date_are_reported() {
        let form = TimesheetForm {
            work_date: "yesterday".to_string(),
            hours_worked: "-1".to_string(),
            hourly_rate: "100".to_string(),
            description: String::new(),
        };

        let errors = form.validate().err().unwrap_or_default();

        assert_eq!(
            errors.get("hours_worked"),
            Some("Hours worked cannot be negative")
        );
        assert_eq!(
            errors.get("work_date"),
            Some("Work date must be a date (YYYY-MM-DD)")
        );
    }
}
