//! Invoice presentation settings

use billable::{
    money::format_amount,
    settings::{SettingValue, SettingsMap},
};
use rust_decimal::{Decimal, prelude::ToPrimitive};

/// Setting keys read when presenting invoices.
pub mod keys {
    pub const INVOICE_TITLE: &str = "invoice_title";
    pub const FREELANCER_NAME: &str = "freelancer_name";
    pub const FREELANCER_EMAIL: &str = "freelancer_email";
    pub const FREELANCER_PHONE: &str = "freelancer_phone";
    pub const FREELANCER_ADDRESS: &str = "freelancer_address";
    pub const CURRENCY_SYMBOL: &str = "currency_symbol";
    pub const INVOICE_FOOTER: &str = "invoice_footer";
    pub const SHOW_HOURLY_RATE: &str = "show_hourly_rate";
    pub const HOURS_DECIMAL_PLACES: &str = "hours_decimal_places";
    pub const DEFAULT_HOURLY_RATE: &str = "default_hourly_rate";
    pub const PDF_FONT_SIZE: &str = "pdf_font_size";
}

const MAX_HOURS_DECIMAL_PLACES: i64 = 6;

/// Values used for keys that are missing or unreadable in storage.
#[must_use]
pub fn defaults() -> SettingsMap {
    SettingsMap::new()
        .with(keys::INVOICE_TITLE, SettingValue::String("Invoice".into()))
        .with(keys::FREELANCER_NAME, SettingValue::String(String::new()))
        .with(keys::FREELANCER_EMAIL, SettingValue::String(String::new()))
        .with(keys::FREELANCER_PHONE, SettingValue::String(String::new()))
        .with(keys::FREELANCER_ADDRESS, SettingValue::String(String::new()))
        .with(keys::CURRENCY_SYMBOL, SettingValue::String("$".into()))
        .with(keys::INVOICE_FOOTER, SettingValue::String(String::new()))
        .with(keys::SHOW_HOURLY_RATE, SettingValue::Bool(true))
        .with(keys::HOURS_DECIMAL_PLACES, SettingValue::Int(2))
        .with(
            keys::DEFAULT_HOURLY_RATE,
            SettingValue::Decimal(Decimal::new(7500, 2)),
        )
        .with(keys::PDF_FONT_SIZE, SettingValue::Float(10.0))
}

/// How invoices are titled, signed and formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoicePresentation {
    pub invoice_title: String,
    pub freelancer_name: String,
    pub freelancer_email: String,
    pub freelancer_phone: String,
    pub freelancer_address: String,
    pub currency_symbol: String,
    pub invoice_footer: String,
    pub show_hourly_rate: bool,
    pub hours_decimal_places: usize,

    /// Rate suggested when creating a client.
    pub default_hourly_rate: Decimal,

    pub pdf_font_size: f64,
}

impl InvoicePresentation {
    /// Read presentation values from typed settings, using [`defaults`] for anything missing.
    #[must_use]
    pub fn from_settings(settings: &SettingsMap) -> Self {
        let fallback = defaults();
        let settings = settings.clone().with_defaults(&fallback);

        let places = settings
            .int_or(keys::HOURS_DECIMAL_PLACES, 2)
            .clamp(0, MAX_HOURS_DECIMAL_PLACES);

        let font_size = settings.float_or(keys::PDF_FONT_SIZE, 10.0);

        Self {
            invoice_title: settings
                .string_or(keys::INVOICE_TITLE, "Invoice")
                .to_string(),
            freelancer_name: settings.string_or(keys::FREELANCER_NAME, "").to_string(),
            freelancer_email: settings.string_or(keys::FREELANCER_EMAIL, "").to_string(),
            freelancer_phone: settings.string_or(keys::FREELANCER_PHONE, "").to_string(),
            freelancer_address: settings
                .string_or(keys::FREELANCER_ADDRESS, "")
                .to_string(),
            currency_symbol: settings.string_or(keys::CURRENCY_SYMBOL, "$").to_string(),
            invoice_footer: settings.string_or(keys::INVOICE_FOOTER, "").to_string(),
            show_hourly_rate: settings.bool_or(keys::SHOW_HOURLY_RATE, true),
            hours_decimal_places: usize::try_from(places).unwrap_or(2),
            default_hourly_rate: settings
                .decimal_or(keys::DEFAULT_HOURLY_RATE, Decimal::new(7500, 2)),
            pdf_font_size: if font_size > 0.0 { font_size } else { 10.0 },
        }
    }

    /// Format a base-currency amount with the configured symbol.
    #[must_use]
    pub fn money(&self, amount: f64) -> String {
        format_amount(amount, &self.currency_symbol)
    }

    /// Format hours with the configured number of decimal places.
    #[must_use]
    pub fn hours(&self, hours: f64) -> String {
        format!("{hours:.prec$}", prec = self.hours_decimal_places)
    }

    /// Default client rate as a float, for prefilling forms.
    #[must_use]
    pub fn default_hourly_rate_f64(&self) -> f64 {
        self.default_hourly_rate.to_f64().unwrap_or(75.0)
    }
}

impl Default for InvoicePresentation {
    fn default() -> Self {
        Self::from_settings(&defaults())
    }
}
