//! Money presentation
//!
//! Totals are computed unrounded in [`crate::totals`]; the helpers here round and format
//! them for display only.

use rusty_money::{Formatter, Money, Params, Position, iso};

/// Round to two decimal places, halves away from zero.
#[must_use]
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Multiply an amount by a conversion rate, for display in another currency.
#[must_use]
pub fn convert(amount: f64, rate: f64) -> f64 {
    amount * rate
}

/// Format `amount` with `symbol`, thousands separators and two decimal places.
///
/// Negative amounts get a leading minus sign: `-$75.00`.
#[must_use]
pub fn format_amount(amount: f64, symbol: &str) -> String {
    let money = Money::from_minor(to_minor(amount).unwrap_or_default(), iso::USD);

    // The symbol is a runtime setting, which `Params` cannot hold.
    let digits = Formatter::money(
        &money,
        Params {
            positions: &[Position::Amount],
            separator_pattern: &[3; 6],
            ..Params::default()
        },
    );

    let sign = if money.is_negative() { "-" } else { "" };

    format!("{sign}{symbol}{digits}")
}

/// Format `amount` using the ISO 4217 rules of `iso_code`, such as `"EUR"`.
///
/// Returns `None` for unknown currency codes and for amounts that cannot be represented.
#[must_use]
pub fn format_in_currency(amount: f64, iso_code: &str) -> Option<String> {
    let currency = iso::find(&iso_code.trim().to_ascii_uppercase())?;
    let minor = to_minor(amount)?;

    Some(Money::from_minor(minor, currency).to_string())
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "range is checked before the cast"
)]
fn to_minor(amount: f64) -> Option<i64> {
    let cents = (amount * 100.0).round();

    #[expect(clippy::cast_precision_loss, reason = "bounds only")]
    let in_range = cents.is_finite() && cents.abs() < i64::MAX as f64;

    in_range.then_some(cents as i64)
}
