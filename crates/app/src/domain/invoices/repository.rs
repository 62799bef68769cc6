//! Invoices Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    invoices::{
        data::{InvoiceDetails, NewInvoice},
        records::{InvoiceId, InvoiceRecord},
    },
    lifecycle::RecordState,
    projects::records::ProjectId,
};

const INSERT_INVOICE_SQL: &str = include_str!("sql/insert_invoice.sql");
const GET_INVOICE_SQL: &str = include_str!("sql/get_invoice.sql");
const GET_INVOICES_BY_PROJECT_SQL: &str = include_str!("sql/get_invoices_by_project.sql");
const UPDATE_INVOICE_SQL: &str = include_str!("sql/update_invoice.sql");
const GET_INVOICE_STATE_SQL: &str = include_str!("sql/get_invoice_state.sql");
const SOFT_DELETE_INVOICE_SQL: &str = include_str!("sql/soft_delete_invoice.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgInvoicesRepository;

impl PgInvoicesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_invoice(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invoice: &NewInvoice,
    ) -> Result<InvoiceId, sqlx::Error> {
        let id: i64 = query_scalar(INSERT_INVOICE_SQL)
            .bind(invoice.project.into_i64())
            .bind(SqlxDate::from(invoice.details.invoice_date))
            .bind(invoice.details.date_paid.map(SqlxDate::from))
            .bind(&invoice.details.payment_terms)
            .bind(invoice.details.amount_due)
            .bind(invoice.details.display_details)
            .fetch_one(&mut **tx)
            .await?;

        Ok(InvoiceId::from_i64(id))
    }

    pub(crate) async fn get_invoice(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invoice: InvoiceId,
    ) -> Result<InvoiceRecord, sqlx::Error> {
        query_as::<Postgres, InvoiceRecord>(GET_INVOICE_SQL)
            .bind(invoice.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_invoices_by_project(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        project: ProjectId,
    ) -> Result<Vec<InvoiceRecord>, sqlx::Error> {
        query_as::<Postgres, InvoiceRecord>(GET_INVOICES_BY_PROJECT_SQL)
            .bind(project.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_invoice(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invoice: InvoiceId,
        details: &InvoiceDetails,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_INVOICE_SQL)
            .bind(invoice.into_i64())
            .bind(SqlxDate::from(details.invoice_date))
            .bind(details.date_paid.map(SqlxDate::from))
            .bind(&details.payment_terms)
            .bind(details.amount_due)
            .bind(details.display_details)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Look an invoice up regardless of whether it has been deleted.
    pub(crate) async fn get_invoice_state(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invoice: InvoiceId,
    ) -> Result<Option<RecordState>, sqlx::Error> {
        let deleted_at: Option<Option<SqlxTimestamp>> = query_scalar(GET_INVOICE_STATE_SQL)
            .bind(invoice.into_i64())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(deleted_at.map(RecordState::from_column))
    }

    pub(crate) async fn soft_delete_invoice(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invoice: InvoiceId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SOFT_DELETE_INVOICE_SQL)
            .bind(invoice.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for InvoiceRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: InvoiceId::from_i64(row.try_get("id")?),
            project: ProjectId::from_i64(row.try_get("project_id")?),
            details: InvoiceDetails {
                invoice_date: row.try_get::<SqlxDate, _>("invoice_date")?.to_jiff(),
                date_paid: row
                    .try_get::<Option<SqlxDate>, _>("date_paid")?
                    .map(SqlxDate::to_jiff),
                payment_terms: row.try_get("payment_terms")?,
                amount_due: row.try_get("amount_due")?,
                display_details: row.try_get("display_details")?,
            },
            state: RecordState::from_column(row.try_get("deleted_at")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
