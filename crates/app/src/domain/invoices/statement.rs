//! Invoice statements
//!
//! A statement gathers an invoice with its project, client and the project's timesheets,
//! and computes the invoice totals from them. It only talks to the service ports, so the
//! same code runs against `PostgreSQL` and against mocks.

use billable::{
    money::convert,
    totals::{BillingTerms, InvoiceTotals, compute_totals},
};
use thiserror::Error;
use tracing::debug;

use crate::{
    context::AppContext,
    domain::{
        clients::{ClientsService, ClientsServiceError, records::ClientRecord},
        invoices::{
            InvoicesService, InvoicesServiceError,
            records::{InvoiceId, InvoiceRecord},
        },
        projects::{ProjectsService, ProjectsServiceError, records::ProjectRecord},
        timesheets::{TimesheetsService, TimesheetsServiceError, records::TimesheetRecord},
    },
};

/// Errors raised while building a statement.
#[derive(Debug, Error)]
pub enum StatementError {
    #[error("invoice not found")]
    InvoiceNotFound,

    #[error("project not found")]
    ProjectNotFound,

    #[error("client not found")]
    ClientNotFound,

    #[error("failed to load invoice")]
    Invoices(#[source] InvoicesServiceError),

    #[error("failed to load project")]
    Projects(#[source] ProjectsServiceError),

    #[error("failed to load client")]
    Clients(#[source] ClientsServiceError),

    #[error("failed to load timesheets")]
    Timesheets(#[source] TimesheetsServiceError),
}

/// Everything needed to present or print one invoice.
#[derive(Debug, Clone)]
pub struct InvoiceStatement {
    pub invoice: InvoiceRecord,
    pub project: ProjectRecord,
    pub client: ClientRecord,

    /// Every active timesheet of the invoice's project, not only those of the billing period.
    pub timesheets: Vec<TimesheetRecord>,

    pub totals: InvoiceTotals,
}

impl InvoiceStatement {
    /// Final total in the project's display currency, when one is configured.
    #[must_use]
    pub fn converted_total(&self) -> Option<f64> {
        self.project.details.shows_converted_total().then(|| {
            convert(
                self.totals.final_total,
                self.project.details.currency_conversion_rate,
            )
        })
    }
}

/// Builds [`InvoiceStatement`]s from the entity services.
pub struct StatementBuilder<'a> {
    invoices: &'a dyn InvoicesService,
    projects: &'a dyn ProjectsService,
    clients: &'a dyn ClientsService,
    timesheets: &'a dyn TimesheetsService,
}

impl<'a> StatementBuilder<'a> {
    #[must_use]
    pub fn new(
        invoices: &'a dyn InvoicesService,
        projects: &'a dyn ProjectsService,
        clients: &'a dyn ClientsService,
        timesheets: &'a dyn TimesheetsService,
    ) -> Self {
        Self {
            invoices,
            projects,
            clients,
            timesheets,
        }
    }

    #[must_use]
    pub fn from_context(app: &'a AppContext) -> Self {
        Self::new(
            app.invoices.as_ref(),
            app.projects.as_ref(),
            app.clients.as_ref(),
            app.timesheets.as_ref(),
        )
    }

    /// Load the invoice and its parents, then compute the totals.
    ///
    /// # Errors
    ///
    /// Returns a `*NotFound` variant when the invoice, its project or its client is missing
    /// or deleted, and wraps any other service failure.
    #[tracing::instrument(
        name = "invoices.statement.build",
        skip(self),
        fields(invoice_id = %invoice),
        err
    )]
    pub async fn build(&self, invoice: InvoiceId) -> Result<InvoiceStatement, StatementError> {
        let invoice = self
            .invoices
            .get_invoice(invoice)
            .await
            .map_err(|error| match error {
                InvoicesServiceError::NotFound => StatementError::InvoiceNotFound,
                other => StatementError::Invoices(other),
            })?;

        let project = self
            .projects
            .get_project(invoice.project)
            .await
            .map_err(|error| match error {
                ProjectsServiceError::NotFound => StatementError::ProjectNotFound,
                other => StatementError::Projects(other),
            })?;

        let client = self
            .clients
            .get_client(project.client)
            .await
            .map_err(|error| match error {
                ClientsServiceError::NotFound => StatementError::ClientNotFound,
                other => StatementError::Clients(other),
            })?;

        let timesheets = self
            .timesheets
            .get_timesheets_by_project(project.id)
            .await
            .map_err(StatementError::Timesheets)?;

        let terms = BillingTerms {
            amount_due: invoice.details.amount_due,
            hourly_rate: project.details.hourly_rate,
            discount_percent: project.details.discount_percent,
            adjustment_amount: project.details.adjustment_amount,
            flat_fee: project.details.flat_fee_invoice,
        };

        let totals = compute_totals(
            &terms,
            timesheets.iter().map(|timesheet| timesheet.details.hours_worked),
        );

        debug!(
            timesheets = timesheets.len(),
            final_total = totals.final_total,
            "built invoice statement"
        );

        Ok(InvoiceStatement {
            invoice,
            project,
            client,
            timesheets,
            totals,
        })
    }
}
