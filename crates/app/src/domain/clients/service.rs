//! Clients service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        clients::{
            data::ClientDetails,
            errors::ClientsServiceError,
            records::{ClientId, ClientRecord},
            repository::PgClientsRepository,
        },
        lifecycle::RecordState,
    },
};

#[derive(Debug, Clone)]
pub struct PgClientsService {
    db: Db,
    repository: PgClientsRepository,
}

impl PgClientsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgClientsRepository::new(),
        }
    }
}

#[async_trait]
impl ClientsService for PgClientsService {
    #[tracing::instrument(
        name = "clients.service.insert_client",
        skip(self, details),
        fields(client_id = tracing::field::Empty),
        err
    )]
    async fn insert_client(&self, details: ClientDetails) -> Result<ClientId, ClientsServiceError> {
        let mut tx = self.db.begin().await?;

        let client = self.repository.insert_client(&mut tx, &details).await?;

        tx.commit().await?;

        tracing::Span::current().record("client_id", tracing::field::display(client));

        info!(client_id = %client, "inserted client");

        Ok(client)
    }

    async fn get_client(&self, client: ClientId) -> Result<ClientRecord, ClientsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_client(&mut tx, client).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn list_clients(&self) -> Result<Vec<ClientRecord>, ClientsServiceError> {
        let mut tx = self.db.begin().await?;

        let clients = self.repository.list_clients(&mut tx).await?;

        tx.commit().await?;

        Ok(clients)
    }

    #[tracing::instrument(
        name = "clients.service.update_client",
        skip(self, details),
        fields(client_id = %client),
        err
    )]
    async fn update_client(
        &self,
        client: ClientId,
        details: ClientDetails,
    ) -> Result<(), ClientsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .update_client(&mut tx, client, &details)
            .await?;

        tx.commit().await?;

        debug!(rows_affected, "updated client");

        Ok(())
    }

    #[tracing::instrument(
        name = "clients.service.soft_delete_client",
        skip(self),
        fields(client_id = %client),
        err
    )]
    async fn soft_delete_client(&self, client: ClientId) -> Result<(), ClientsServiceError> {
        let mut tx = self.db.begin().await?;

        match self.repository.get_client_state(&mut tx, client).await? {
            Some(RecordState::Active) => {
                self.repository.soft_delete_client(&mut tx, client).await?;

                info!(client_id = %client, "deleted client");
            }
            Some(RecordState::Deleted { at }) => {
                debug!(deleted_at = %at, "client already deleted");
            }
            None => debug!("client does not exist"),
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ClientsService: Send + Sync {
    /// Store a new client and return its id.
    async fn insert_client(&self, details: ClientDetails) -> Result<ClientId, ClientsServiceError>;

    /// Retrieve a single active client.
    async fn get_client(&self, client: ClientId) -> Result<ClientRecord, ClientsServiceError>;

    /// Retrieve every active client, ordered by name.
    async fn list_clients(&self) -> Result<Vec<ClientRecord>, ClientsServiceError>;

    /// Replace a client's details. Does nothing when the client does not exist.
    async fn update_client(
        &self,
        client: ClientId,
        details: ClientDetails,
    ) -> Result<(), ClientsServiceError>;

    /// Mark a client as deleted. Deleting an absent or deleted client is not an error.
    async fn soft_delete_client(&self, client: ClientId) -> Result<(), ClientsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::client_details};

    use super::*;

    #[tokio::test]
    async fn insert_client_then_get_returns_details() -> TestResult {
        let ctx = TestContext::new().await;
        let details = client_details("Acme Ltd");

        let client = ctx.clients.insert_client(details.clone()).await?;
        let record = ctx.clients.get_client(client).await?;

        assert_eq!(record.id, client);
        assert_eq!(record.details, details);
        assert!(record.state.is_active());

        Ok(())
    }

    #[tokio::test]
    async fn get_client_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.clients.get_client(ClientId::from_i64(9_999)).await;

        assert!(
            matches!(result, Err(ClientsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_clients_orders_by_name() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.clients.insert_client(client_details("zeta")).await?;
        ctx.clients.insert_client(client_details("Alpha")).await?;

        let names: Vec<String> = ctx
            .clients
            .list_clients()
            .await?
            .into_iter()
            .map(|record| record.details.name)
            .collect();

        assert_eq!(names, vec!["Alpha".to_string(), "zeta".to_string()]);

        Ok(())
    }

    #[tokio::test]
    async fn update_client_replaces_details_and_bumps_updated_at() -> TestResult {
        let ctx = TestContext::new().await;
        let client = ctx.clients.insert_client(client_details("Acme")).await?;
        let before = ctx.clients.get_client(client).await?;

        let mut details = client_details("Acme Holdings");
        details.address_on_invoice = true;
        details.invoice_cc_email = Some("accounts@acme.test".to_string());

        ctx.clients.update_client(client, details.clone()).await?;

        let after = ctx.clients.get_client(client).await?;

        assert_eq!(after.details, details);
        assert!(after.updated_at >= before.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_client_unknown_id_is_a_no_op() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.clients
            .update_client(ClientId::from_i64(424_242), client_details("Ghost"))
            .await?;

        assert!(ctx.clients.list_clients().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn soft_delete_client_twice_succeeds_and_hides_client() -> TestResult {
        let ctx = TestContext::new().await;
        let client = ctx.clients.insert_client(client_details("Acme")).await?;

        ctx.clients.soft_delete_client(client).await?;
        ctx.clients.soft_delete_client(client).await?;

        let result = ctx.clients.get_client(client).await;

        assert!(
            matches!(result, Err(ClientsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
        assert!(ctx.clients.list_clients().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn soft_delete_unknown_client_is_a_no_op() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.clients
            .soft_delete_client(ClientId::from_i64(77))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn blank_name_violates_storage_constraint() {
        let ctx = TestContext::new().await;

        let result = ctx.clients.insert_client(client_details("   ")).await;

        assert!(
            matches!(result, Err(ClientsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }
}
