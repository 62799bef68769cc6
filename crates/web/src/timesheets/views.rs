//! Timesheet Views

use serde::Serialize;

use billable_app::domain::timesheets::records::TimesheetRecord;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TimesheetView {
    pub(crate) id: i64,
    pub(crate) project_id: i64,
    pub(crate) work_date: String,
    pub(crate) hours_worked: String,
    pub(crate) hourly_rate: String,
    pub(crate) line_total: String,
    pub(crate) description: Option<String>,
}

impl From<&TimesheetRecord> for TimesheetView {
    fn from(record: &TimesheetRecord) -> Self {
        let details = &record.details;

        Self {
            id: record.id.into_i64(),
            project_id: record.project.into_i64(),
            work_date: details.work_date.to_string(),
            hours_worked: format!("{:.2}", details.hours_worked),
            hourly_rate: format!("{:.2}", details.hourly_rate),
            line_total: format!("{:.2}", record.line_total()),
            description: details.description.clone(),
        }
    }
}
