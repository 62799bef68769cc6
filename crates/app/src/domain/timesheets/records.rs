//! Timesheet Records

use jiff::Timestamp;

use crate::{
    domain::{
        lifecycle::RecordState, projects::records::ProjectId, timesheets::data::TimesheetDetails,
    },
    ids::TypedId,
};

/// Timesheet Id
pub type TimesheetId = TypedId<TimesheetRecord>;

/// Timesheet Record
#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetRecord {
    pub id: TimesheetId,
    pub project: ProjectId,
    pub details: TimesheetDetails,
    pub state: RecordState,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TimesheetRecord {
    /// Hours multiplied by the rate captured on the timesheet.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.details.hours_worked * self.details.hourly_rate
    }
}
