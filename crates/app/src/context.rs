//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        clients::{ClientsService, PgClientsService},
        invoices::{InvoicesService, PgInvoicesService, StatementBuilder},
        projects::{PgProjectsService, ProjectsService},
        settings::{PgSettingsService, SettingsService},
        timesheets::{PgTimesheetsService, TimesheetsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub clients: Arc<dyn ClientsService>,
    pub projects: Arc<dyn ProjectsService>,
    pub timesheets: Arc<dyn TimesheetsService>,
    pub invoices: Arc<dyn InvoicesService>,
    pub settings: Arc<dyn SettingsService>,
}

impl AppContext {
    /// Build application context from a database URL, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        Ok(Self::from_db(&Db::new(pool)))
    }

    /// Wire the `PostgreSQL` services onto an existing database handle.
    #[must_use]
    pub fn from_db(db: &Db) -> Self {
        Self {
            clients: Arc::new(PgClientsService::new(db.clone())),
            projects: Arc::new(PgProjectsService::new(db.clone())),
            timesheets: Arc::new(PgTimesheetsService::new(db.clone())),
            invoices: Arc::new(PgInvoicesService::new(db.clone())),
            settings: Arc::new(PgSettingsService::new(db.clone())),
        }
    }

    /// Statement builder over this context's services.
    #[must_use]
    pub fn statements(&self) -> StatementBuilder<'_> {
        StatementBuilder::from_context(self)
    }
}
