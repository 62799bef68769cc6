use std::path::PathBuf;

use billable_app::{
    domain::{
        invoices::records::InvoiceId,
        settings::{InvoicePresentation, SettingsService, presentation},
    },
    pdf::render_invoice_pdf,
};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub(crate) struct InvoiceCommand {
    #[command(subcommand)]
    command: InvoiceSubcommand,
}

#[derive(Debug, Subcommand)]
enum InvoiceSubcommand {
    /// Write an invoice as a PDF file
    Print(PrintInvoiceArgs),
}

#[derive(Debug, Args)]
pub(crate) struct PrintInvoiceArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Invoice id
    #[arg(long)]
    id: InvoiceId,

    /// Output file; defaults to `invoice-<id>.pdf`
    #[arg(long)]
    out: Option<PathBuf>,
}

pub(crate) async fn run(command: InvoiceCommand) -> Result<(), String> {
    match command.command {
        InvoiceSubcommand::Print(args) => print(args).await,
    }
}

async fn print(args: PrintInvoiceArgs) -> Result<(), String> {
    let app = super::connect(&args.database_url).await?;

    let settings = app
        .settings
        .get_all(&presentation::defaults())
        .await
        .map_err(|error| format!("failed to load settings: {error}"))?;

    let statement = app
        .statements()
        .build(args.id)
        .await
        .map_err(|error| format!("failed to load invoice {}: {error}", args.id))?;

    let bytes = render_invoice_pdf(&statement, &InvoicePresentation::from_settings(&settings))
        .map_err(|error| format!("failed to render invoice {}: {error}", args.id))?;

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(format!("invoice-{}.pdf", args.id)));

    std::fs::write(&out, bytes)
        .map_err(|error| format!("failed to write {}: {error}", out.display()))?;

    println!("wrote {}", out.display());

    Ok(())
}
