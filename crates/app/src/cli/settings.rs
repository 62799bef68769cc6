use billable_app::domain::settings::{
    SettingsService, SettingsServiceError, records::SettingRecord,
};
use clap::{Args, Subcommand};
use tabled::{
    builder::Builder,
    settings::{Style, Theme},
};

#[derive(Debug, Args)]
pub(crate) struct SettingsCommand {
    #[command(subcommand)]
    command: SettingsSubcommand,
}

#[derive(Debug, Subcommand)]
enum SettingsSubcommand {
    /// Print every setting
    List(ListSettingsArgs),

    /// Change a setting's value
    Set(SetSettingArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ListSettingsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

#[derive(Debug, Args)]
pub(crate) struct SetSettingArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Setting key, such as `invoice_title`
    #[arg(long)]
    key: String,

    /// New value; must parse as the setting's declared type
    #[arg(long)]
    value: String,
}

pub(crate) async fn run(command: SettingsCommand) -> Result<(), String> {
    match command.command {
        SettingsSubcommand::List(args) => list(args).await,
        SettingsSubcommand::Set(args) => set(args).await,
    }
}

async fn list(args: ListSettingsArgs) -> Result<(), String> {
    let app = super::connect(&args.database_url).await?;

    let settings = app
        .settings
        .list_settings()
        .await
        .map_err(|error| format!("failed to list settings: {error}"))?;

    println!("{}", settings_table(&settings));

    Ok(())
}

async fn set(args: SetSettingArgs) -> Result<(), String> {
    let app = super::connect(&args.database_url).await?;

    let value = app
        .settings
        .update_value(&args.key, &args.value)
        .await
        .map_err(|error| match error {
            SettingsServiceError::InvalidValue(reason) => {
                format!("failed to update {}: {reason}", args.key)
            }
            other => format!("failed to update {}: {other}", args.key),
        })?;

    println!("{} = {value}", args.key);

    Ok(())
}

fn settings_table(settings: &[SettingRecord]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Key", "Value", "Type", "Description"]);

    for setting in settings {
        builder.push_record([
            setting.key.as_str(),
            setting.value.as_str(),
            setting.data_type.as_str(),
            setting.description.as_str(),
        ]);
    }

    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));

    table.to_string()
}

#[cfg(test)]
mod tests {
    use billable::settings::SettingType;
    use jiff::Timestamp;

    use super::*;

    #[test]
    fn settings_table_lists_every_setting() {
        let settings = vec![
            SettingRecord {
                key: "invoice_title".to_string(),
                value: "Invoice".to_string(),
                data_type: SettingType::String,
                description: "Title printed at the top of every invoice".to_string(),
                updated_at: Timestamp::UNIX_EPOCH,
            },
            SettingRecord {
                key: "hours_decimal_places".to_string(),
                value: "2".to_string(),
                data_type: SettingType::Int,
                description: String::new(),
                updated_at: Timestamp::UNIX_EPOCH,
            },
        ];

        let table = settings_table(&settings);

        assert!(table.contains("Key"));
        assert!(table.contains("invoice_title"));
        assert!(table.contains("hours_decimal_places"));
        assert!(table.contains("int"));
        assert!(table.starts_with('╭'));
    }
}
