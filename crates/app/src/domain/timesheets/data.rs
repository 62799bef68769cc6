//! Timesheets Data

use jiff::civil::Date;

use crate::domain::projects::records::ProjectId;

/// Editable timesheet attributes, used for both inserts and updates.
#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetDetails {
    pub work_date: Date,
    pub hours_worked: f64,

    /// Rate in effect when the work was logged. Later project rate changes leave it alone.
    pub hourly_rate: f64,

    pub description: Option<String>,
}

/// New Timesheet Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimesheet {
    pub project: ProjectId,
    pub details: TimesheetDetails,
}
