//! Projects Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query::Query, query_as,
    query_scalar,
};

use crate::domain::{
    clients::records::ClientId,
    lifecycle::RecordState,
    projects::{
        data::{NewProject, ProjectDetails, ProjectStatus},
        records::{ProjectId, ProjectRecord},
    },
};

const INSERT_PROJECT_SQL: &str = include_str!("sql/insert_project.sql");
const GET_PROJECT_SQL: &str = include_str!("sql/get_project.sql");
const GET_PROJECTS_BY_CLIENT_SQL: &str = include_str!("sql/get_projects_by_client.sql");
const UPDATE_PROJECT_SQL: &str = include_str!("sql/update_project.sql");
const GET_PROJECT_STATE_SQL: &str = include_str!("sql/get_project_state.sql");
const SOFT_DELETE_PROJECT_SQL: &str = include_str!("sql/soft_delete_project.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProjectsRepository;

impl PgProjectsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_project(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        project: &NewProject,
    ) -> Result<ProjectId, sqlx::Error> {
        let id: i64 = query_scalar(INSERT_PROJECT_SQL)
            .bind(project.client.into_i64())
            .bind(&project.details.name)
            .bind(project.details.status.label())
            .bind(project.details.hourly_rate)
            .bind(project.details.discount_percent)
            .bind(&project.details.discount_reason)
            .bind(project.details.adjustment_amount)
            .bind(&project.details.adjustment_reason)
            .bind(&project.details.currency_display)
            .bind(project.details.currency_conversion_rate)
            .bind(project.details.flat_fee_invoice)
            .bind(&project.details.notes)
            .fetch_one(&mut **tx)
            .await?;

        Ok(ProjectId::from_i64(id))
    }

    pub(crate) async fn get_project(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        project: ProjectId,
    ) -> Result<ProjectRecord, sqlx::Error> {
        query_as::<Postgres, ProjectRecord>(GET_PROJECT_SQL)
            .bind(project.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_projects_by_client(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        client: ClientId,
    ) -> Result<Vec<ProjectRecord>, sqlx::Error> {
        query_as::<Postgres, ProjectRecord>(GET_PROJECTS_BY_CLIENT_SQL)
            .bind(client.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_project(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        project: ProjectId,
        details: &ProjectDetails,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = bind_details(query(UPDATE_PROJECT_SQL).bind(project.into_i64()), details)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Look a project up regardless of whether it has been deleted.
    pub(crate) async fn get_project_state(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        project: ProjectId,
    ) -> Result<Option<RecordState>, sqlx::Error> {
        let deleted_at: Option<Option<SqlxTimestamp>> = query_scalar(GET_PROJECT_STATE_SQL)
            .bind(project.into_i64())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(deleted_at.map(RecordState::from_column))
    }

    pub(crate) async fn soft_delete_project(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        project: ProjectId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SOFT_DELETE_PROJECT_SQL)
            .bind(project.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn bind_details<'q>(
    query: Query<'q, Postgres, sqlx::postgres::PgArguments>,
    details: &'q ProjectDetails,
) -> Query<'q, Postgres, sqlx::postgres::PgArguments> {
    query
        .bind(&details.name)
        .bind(details.status.label())
        .bind(details.hourly_rate)
        .bind(details.discount_percent)
        .bind(&details.discount_reason)
        .bind(details.adjustment_amount)
        .bind(&details.adjustment_reason)
        .bind(&details.currency_display)
        .bind(details.currency_conversion_rate)
        .bind(details.flat_fee_invoice)
        .bind(&details.notes)
}

impl<'r> FromRow<'r, PgRow> for ProjectRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<ProjectStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: ProjectId::from_i64(row.try_get("id")?),
            client: ClientId::from_i64(row.try_get("client_id")?),
            details: ProjectDetails {
                name: row.try_get("name")?,
                status,
                hourly_rate: row.try_get("hourly_rate")?,
                discount_percent: row.try_get("discount_percent")?,
                discount_reason: row.try_get("discount_reason")?,
                adjustment_amount: row.try_get("adjustment_amount")?,
                adjustment_reason: row.try_get("adjustment_reason")?,
                currency_display: row.try_get("currency_display")?,
                currency_conversion_rate: row.try_get("currency_conversion_rate")?,
                flat_fee_invoice: row.try_get("flat_fee_invoice")?,
                notes: row.try_get("notes")?,
            },
            state: RecordState::from_column(row.try_get("deleted_at")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
