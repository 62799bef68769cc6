//! Timesheets service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        lifecycle::RecordState,
        projects::records::ProjectId,
        timesheets::{
            data::{NewTimesheet, TimesheetDetails},
            errors::TimesheetsServiceError,
            records::{TimesheetId, TimesheetRecord},
            repository::PgTimesheetsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgTimesheetsService {
    db: Db,
    repository: PgTimesheetsRepository,
}

impl PgTimesheetsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTimesheetsRepository::new(),
        }
    }
}

#[async_trait]
impl TimesheetsService for PgTimesheetsService {
    #[tracing::instrument(
        name = "timesheets.service.insert_timesheet",
        skip(self, timesheet),
        fields(
            project_id = %timesheet.project,
            hours_worked = timesheet.details.hours_worked,
            timesheet_id = tracing::field::Empty
        ),
        err
    )]
    async fn insert_timesheet(
        &self,
        timesheet: NewTimesheet,
    ) -> Result<TimesheetId, TimesheetsServiceError> {
        let mut tx = self.db.begin().await?;

        let id = self.repository.insert_timesheet(&mut tx, &timesheet).await?;

        tx.commit().await?;

        tracing::Span::current().record("timesheet_id", tracing::field::display(id));

        info!(timesheet_id = %id, "inserted timesheet");

        Ok(id)
    }

    async fn get_timesheet(
        &self,
        timesheet: TimesheetId,
    ) -> Result<TimesheetRecord, TimesheetsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_timesheet(&mut tx, timesheet).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn get_timesheets_by_project(
        &self,
        project: ProjectId,
    ) -> Result<Vec<TimesheetRecord>, TimesheetsServiceError> {
        let mut tx = self.db.begin().await?;

        let timesheets = self
            .repository
            .get_timesheets_by_project(&mut tx, project)
            .await?;

        tx.commit().await?;

        Ok(timesheets)
    }

    #[tracing::instrument(
        name = "timesheets.service.update_timesheet",
        skip(self, details),
        fields(timesheet_id = %timesheet),
        err
    )]
    async fn update_timesheet(
        &self,
        timesheet: TimesheetId,
        details: TimesheetDetails,
    ) -> Result<(), TimesheetsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .update_timesheet(&mut tx, timesheet, &details)
            .await?;

        tx.commit().await?;

        debug!(rows_affected, "updated timesheet");

        Ok(())
    }

    #[tracing::instrument(
        name = "timesheets.service.soft_delete_timesheet",
        skip(self),
        fields(timesheet_id = %timesheet),
        err
    )]
    async fn soft_delete_timesheet(
        &self,
        timesheet: TimesheetId,
    ) -> Result<(), TimesheetsServiceError> {
        let mut tx = self.db.begin().await?;

        match self.repository.get_timesheet_state(&mut tx, timesheet).await? {
            Some(RecordState::Active) => {
                self.repository
                    .soft_delete_timesheet(&mut tx, timesheet)
                    .await?;

                info!(timesheet_id = %timesheet, "deleted timesheet");
            }
            Some(RecordState::Deleted { at }) => {
                debug!(deleted_at = %at, "timesheet already deleted");
            }
            None => debug!("timesheet does not exist"),
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait TimesheetsService: Send + Sync {
    /// Store a new timesheet for a project and return its id.
    async fn insert_timesheet(
        &self,
        timesheet: NewTimesheet,
    ) -> Result<TimesheetId, TimesheetsServiceError>;

    /// Retrieve a single active timesheet.
    async fn get_timesheet(
        &self,
        timesheet: TimesheetId,
    ) -> Result<TimesheetRecord, TimesheetsServiceError>;

    /// Retrieve the active timesheets of a project, oldest work date first.
    async fn get_timesheets_by_project(
        &self,
        project: ProjectId,
    ) -> Result<Vec<TimesheetRecord>, TimesheetsServiceError>;

    /// Replace a timesheet's details. Does nothing when the timesheet does not exist.
    async fn update_timesheet(
        &self,
        timesheet: TimesheetId,
        details: TimesheetDetails,
    ) -> Result<(), TimesheetsServiceError>;

    /// Mark a timesheet as deleted. Deleting an absent or deleted timesheet is not an error.
    async fn soft_delete_timesheet(
        &self,
        timesheet: TimesheetId,
    ) -> Result<(), TimesheetsServiceError>;
}
