//! Billable prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    money::{convert, format_amount, format_in_currency, round_cents},
    settings::{RawSetting, SettingError, SettingType, SettingValue, SettingsMap},
    totals::{BillingTerms, InvoiceTotals, compute_totals},
    validation::{FieldErrors, max_chars, not_blank, permitted_value},
};
