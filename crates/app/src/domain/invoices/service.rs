//! Invoices service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        invoices::{
            data::{InvoiceDetails, NewInvoice},
            errors::InvoicesServiceError,
            records::{InvoiceId, InvoiceRecord},
            repository::PgInvoicesRepository,
        },
        lifecycle::RecordState,
        projects::records::ProjectId,
    },
};

#[derive(Debug, Clone)]
pub struct PgInvoicesService {
    db: Db,
    repository: PgInvoicesRepository,
}

impl PgInvoicesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgInvoicesRepository::new(),
        }
    }
}

#[async_trait]
impl InvoicesService for PgInvoicesService {
    #[tracing::instrument(
        name = "invoices.service.insert_invoice",
        skip(self, invoice),
        fields(
            project_id = %invoice.project,
            amount_due = invoice.details.amount_due,
            invoice_id = tracing::field::Empty
        ),
        err
    )]
    async fn insert_invoice(&self, invoice: NewInvoice) -> Result<InvoiceId, InvoicesServiceError> {
        let mut tx = self.db.begin().await?;

        let id = self.repository.insert_invoice(&mut tx, &invoice).await?;

        tx.commit().await?;

        tracing::Span::current().record("invoice_id", tracing::field::display(id));

        info!(invoice_id = %id, "inserted invoice");

        Ok(id)
    }

    async fn get_invoice(&self, invoice: InvoiceId) -> Result<InvoiceRecord, InvoicesServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_invoice(&mut tx, invoice).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn get_invoices_by_project(
        &self,
        project: ProjectId,
    ) -> Result<Vec<InvoiceRecord>, InvoicesServiceError> {
        let mut tx = self.db.begin().await?;

        let invoices = self
            .repository
            .get_invoices_by_project(&mut tx, project)
            .await?;

        tx.commit().await?;

        Ok(invoices)
    }

    #[tracing::instrument(
        name = "invoices.service.update_invoice",
        skip(self, details),
        fields(invoice_id = %invoice),
        err
    )]
    async fn update_invoice(
        &self,
        invoice: InvoiceId,
        details: InvoiceDetails,
    ) -> Result<(), InvoicesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .update_invoice(&mut tx, invoice, &details)
            .await?;

        tx.commit().await?;

        debug!(rows_affected, "updated invoice");

        Ok(())
    }

    #[tracing::instrument(
        name = "invoices.service.soft_delete_invoice",
        skip(self),
        fields(invoice_id = %invoice),
        err
    )]
    async fn soft_delete_invoice(&self, invoice: InvoiceId) -> Result<(), InvoicesServiceError> {
        let mut tx = self.db.begin().await?;

        match self.repository.get_invoice_state(&mut tx, invoice).await? {
            Some(RecordState::Active) => {
                self.repository.soft_delete_invoice(&mut tx, invoice).await?;

                info!(invoice_id = %invoice, "deleted invoice");
            }
            Some(RecordState::Deleted { at }) => {
                debug!(deleted_at = %at, "invoice already deleted");
            }
            None => debug!("invoice does not exist"),
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait InvoicesService: Send + Sync {
    /// Store a new invoice for a project and return its id.
    async fn insert_invoice(&self, invoice: NewInvoice) -> Result<InvoiceId, InvoicesServiceError>;

    /// Retrieve a single active invoice.
    async fn get_invoice(&self, invoice: InvoiceId) -> Result<InvoiceRecord, InvoicesServiceError>;

    /// Retrieve the active invoices of a project, newest invoice date first.
    async fn get_invoices_by_project(
        &self,
        project: ProjectId,
    ) -> Result<Vec<InvoiceRecord>, InvoicesServiceError>;

    /// Replace an invoice's details. Does nothing when the invoice does not exist.
    async fn update_invoice(
        &self,
        invoice: InvoiceId,
        details: InvoiceDetails,
    ) -> Result<(), InvoicesServiceError>;

    /// Mark an invoice as deleted. Deleting an absent or deleted invoice is not an error.
    async fn soft_delete_invoice(&self, invoice: InvoiceId) -> Result<(), InvoicesServiceError>;
}
