use billable_app::context::AppContext;
use clap::{Parser, Subcommand};

mod invoice;
mod settings;

#[derive(Debug, Parser)]
#[command(name = "billable-app", about = "Billable operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Settings(settings::SettingsCommand),
    Invoice(invoice::InvoiceCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Settings(command) => settings::run(command).await,
            Commands::Invoice(command) => invoice::run(command).await,
        }
    }
}

async fn connect(database_url: &str) -> Result<AppContext, String> {
    AppContext::from_database_url(database_url)
        .await
        .map_err(|error| format!("failed to initialise application: {error}"))
}
