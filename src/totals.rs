//! Invoice Totals
//!
//! Discount and adjustment arithmetic for an invoice. Everything here is plain `f64` and is
//! never rounded; rounding belongs to presentation (see [`crate::money`]).

use serde::Serialize;

/// Billing inputs for one invoice, taken from the invoice and its project.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillingTerms {
    /// Base amount entered on the invoice, before discount and adjustment.
    pub amount_due: f64,

    /// The project's hourly rate.
    pub hourly_rate: f64,

    /// Percentage (0-100) taken off the base amount.
    pub discount_percent: Option<f64>,

    /// Signed flat amount applied after the discount.
    pub adjustment_amount: Option<f64>,

    /// Whether the project is billed at a fixed fee.
    pub flat_fee: bool,
}

/// Computed figures for an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvoiceTotals {
    /// Sum of hours over the timesheets considered.
    pub total_hours: f64,

    /// Amount before discount and adjustment (the invoice's amount due).
    pub subtotal: f64,

    /// Amount taken off by the discount; zero without one.
    pub discount_amount: f64,

    /// Subtotal once the discount has been applied.
    pub subtotal_after_discount: f64,

    /// Adjustment applied after the discount; zero without one.
    pub adjustment_amount: f64,

    /// Amount payable.
    pub final_total: f64,

    /// Effective hourly rate shown on the invoice.
    pub avg_rate: f64,
}

/// Compute invoice totals from billing terms and the hours worked.
///
/// The discount is applied to the base amount first, then the adjustment is added. A
/// discount of zero or less has no effect. The average rate falls back to the project rate
/// for flat-fee projects and when no hours were logged.
pub fn compute_totals<I>(terms: &BillingTerms, hours: I) -> InvoiceTotals
where
    I: IntoIterator<Item = f64>,
{
    let total_hours = hours.into_iter().fold(0.0, |total, hours| total + hours);
    let subtotal = terms.amount_due;

    let discount_amount = match terms.discount_percent {
        Some(percent) if percent > 0.0 => subtotal * (percent / 100.0),
        _ => 0.0,
    };

    let subtotal_after_discount = subtotal - discount_amount;
    let adjustment_amount = terms.adjustment_amount.unwrap_or(0.0);
    let final_total = subtotal_after_discount + adjustment_amount;

    let avg_rate = if terms.flat_fee || total_hours <= 0.0 {
        terms.hourly_rate
    } else {
        terms.amount_due / total_hours
    };

    InvoiceTotals {
        total_hours,
        subtotal,
        discount_amount,
        subtotal_after_discount,
        adjustment_amount,
        final_total,
        avg_rate,
    }
}
