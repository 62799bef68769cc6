//! Timesheets Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    lifecycle::RecordState,
    projects::records::ProjectId,
    timesheets::{
        data::{NewTimesheet, TimesheetDetails},
        records::{TimesheetId, TimesheetRecord},
    },
};

const INSERT_TIMESHEET_SQL: &str = include_str!("sql/insert_timesheet.sql");
const GET_TIMESHEET_SQL: &str = include_str!("sql/get_timesheet.sql");
const GET_TIMESHEETS_BY_PROJECT_SQL: &str = include_str!("sql/get_timesheets_by_project.sql");
const UPDATE_TIMESHEET_SQL: &str = include_str!("sql/update_timesheet.sql");
const GET_TIMESHEET_STATE_SQL: &str = include_str!("sql/get_timesheet_state.sql");
const SOFT_DELETE_TIMESHEET_SQL: &str = include_str!("sql/soft_delete_timesheet.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTimesheetsRepository;

impl PgTimesheetsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_timesheet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        timesheet: &NewTimesheet,
    ) -> Result<TimesheetId, sqlx::Error> {
        let id: i64 = query_scalar(INSERT_TIMESHEET_SQL)
            .bind(timesheet.project.into_i64())
            .bind(SqlxDate::from(timesheet.details.work_date))
            .bind(timesheet.details.hours_worked)
            .bind(timesheet.details.hourly_rate)
            .bind(&timesheet.details.description)
            .fetch_one(&mut **tx)
            .await?;

        Ok(TimesheetId::from_i64(id))
    }

    pub(crate) async fn get_timesheet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        timesheet: TimesheetId,
    ) -> Result<TimesheetRecord, sqlx::Error> {
        query_as::<Postgres, TimesheetRecord>(GET_TIMESHEET_SQL)
            .bind(timesheet.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_timesheets_by_project(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        project: ProjectId,
    ) -> Result<Vec<TimesheetRecord>, sqlx::Error> {
        query_as::<Postgres, TimesheetRecord>(GET_TIMESHEETS_BY_PROJECT_SQL)
            .bind(project.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_timesheet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        timesheet: TimesheetId,
        details: &TimesheetDetails,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_TIMESHEET_SQL)
            .bind(timesheet.into_i64())
            .bind(SqlxDate::from(details.work_date))
            .bind(details.hours_worked)
            .bind(details.hourly_rate)
            .bind(&details.description)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Look a timesheet up regardless of whether it has been deleted.
    pub(crate) async fn get_timesheet_state(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        timesheet: TimesheetId,
    ) -> Result<Option<RecordState>, sqlx::Error> {
        let deleted_at: Option<Option<SqlxTimestamp>> = query_scalar(GET_TIMESHEET_STATE_SQL)
            .bind(timesheet.into_i64())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(deleted_at.map(RecordState::from_column))
    }

    pub(crate) async fn soft_delete_timesheet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        timesheet: TimesheetId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SOFT_DELETE_TIMESHEET_SQL)
            .bind(timesheet.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for TimesheetRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: TimesheetId::from_i64(row.try_get("id")?),
            project: ProjectId::from_i64(row.try_get("project_id")?),
            details: TimesheetDetails {
                work_date: row.try_get::<SqlxDate, _>("work_date")?.to_jiff(),
                hours_worked: row.try_get("hours_worked")?,
                hourly_rate: row.try_get("hourly_rate")?,
                description: row.try_get("description")?,
            },
            state: RecordState::from_column(row.try_get("deleted_at")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
