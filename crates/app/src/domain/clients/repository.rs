//! Clients Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    clients::{
        data::ClientDetails,
        records::{ClientId, ClientRecord},
    },
    lifecycle::RecordState,
};

const INSERT_CLIENT_SQL: &str = include_str!("sql/insert_client.sql");
const GET_CLIENT_SQL: &str = include_str!("sql/get_client.sql");
const LIST_CLIENTS_SQL: &str = include_str!("sql/list_clients.sql");
const UPDATE_CLIENT_SQL: &str = include_str!("sql/update_client.sql");
const GET_CLIENT_STATE_SQL: &str = include_str!("sql/get_client_state.sql");
const SOFT_DELETE_CLIENT_SQL: &str = include_str!("sql/soft_delete_client.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgClientsRepository;

impl PgClientsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_client(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        details: &ClientDetails,
    ) -> Result<ClientId, sqlx::Error> {
        let id: i64 = query_scalar(INSERT_CLIENT_SQL)
            .bind(&details.name)
            .bind(&details.email)
            .bind(&details.phone)
            .bind(&details.address)
            .bind(details.default_hourly_rate)
            .bind(details.address_on_invoice)
            .bind(&details.invoice_cc_email)
            .bind(&details.invoice_cc_description)
            .bind(&details.notes)
            .fetch_one(&mut **tx)
            .await?;

        Ok(ClientId::from_i64(id))
    }

    pub(crate) async fn get_client(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        client: ClientId,
    ) -> Result<ClientRecord, sqlx::Error> {
        query_as::<Postgres, ClientRecord>(GET_CLIENT_SQL)
            .bind(client.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_clients(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ClientRecord>, sqlx::Error> {
        query_as::<Postgres, ClientRecord>(LIST_CLIENTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_client(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        client: ClientId,
        details: &ClientDetails,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_CLIENT_SQL)
            .bind(client.into_i64())
            .bind(&details.name)
            .bind(&details.email)
            .bind(&details.phone)
            .bind(&details.address)
            .bind(details.default_hourly_rate)
            .bind(details.address_on_invoice)
            .bind(&details.invoice_cc_email)
            .bind(&details.invoice_cc_description)
            .bind(&details.notes)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Look a client up regardless of whether it has been deleted.
    pub(crate) async fn get_client_state(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        client: ClientId,
    ) -> Result<Option<RecordState>, sqlx::Error> {
        let deleted_at: Option<Option<SqlxTimestamp>> = query_scalar(GET_CLIENT_STATE_SQL)
            .bind(client.into_i64())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(deleted_at.map(RecordState::from_column))
    }

    pub(crate) async fn soft_delete_client(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        client: ClientId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SOFT_DELETE_CLIENT_SQL)
            .bind(client.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ClientRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ClientId::from_i64(row.try_get("id")?),
            details: ClientDetails {
                name: row.try_get("name")?,
                email: row.try_get("email")?,
                phone: row.try_get("phone")?,
                address: row.try_get("address")?,
                default_hourly_rate: row.try_get("default_hourly_rate")?,
                address_on_invoice: row.try_get("address_on_invoice")?,
                invoice_cc_email: row.try_get("invoice_cc_email")?,
                invoice_cc_description: row.try_get("invoice_cc_description")?,
                notes: row.try_get("notes")?,
            },
            state: RecordState::from_column(row.try_get("deleted_at")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
