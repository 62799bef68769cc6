//! Invoice Form

use billable::validation::{FieldErrors, is_non_negative, max_chars, not_blank};
use billable_app::domain::invoices::data::InvoiceDetails;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::forms;

const MAX_TERMS: usize = 255;

pub(crate) const DEFAULT_PAYMENT_TERMS: &str = "Net 30";

/// Submitted invoice fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct InvoiceForm {
    pub(crate) invoice_date: String,
    pub(crate) date_paid: String,
    pub(crate) payment_terms: String,
    pub(crate) amount_due: String,
    pub(crate) display_details: Option<String>,
}

impl InvoiceForm {
    /// Unpaid, itemized invoice dated `invoice_date` for `amount_due`.
    pub(crate) fn new(invoice_date: Date, amount_due: f64) -> Self {
        Self {
            invoice_date: invoice_date.to_string(),
            payment_terms: DEFAULT_PAYMENT_TERMS.to_string(),
            amount_due: forms::number_text(amount_due),
            display_details: Some("on".to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn from_details(details: &InvoiceDetails) -> Self {
        Self {
            invoice_date: details.invoice_date.to_string(),
            date_paid: details
                .date_paid
                .map(|date| date.to_string())
                .unwrap_or_default(),
            payment_terms: details.payment_terms.clone(),
            amount_due: forms::number_text(details.amount_due),
            display_details: details.display_details.then(|| "on".to_string()),
        }
    }

    pub(crate) fn validate(&self) -> Result<InvoiceDetails, FieldErrors> {
        let mut errors = FieldErrors::new();

        let invoice_date = forms::date(
            &mut errors,
            "invoice_date",
            "Invoice date",
            &self.invoice_date,
        );
        let date_paid = forms::optional_date(&mut errors, "date_paid", "Date paid", &self.date_paid);

        errors.check(
            not_blank(&self.payment_terms),
            "payment_terms",
            "Payment terms cannot be blank",
        );
        errors.check(
            max_chars(&self.payment_terms, MAX_TERMS),
            "payment_terms",
            "Payment terms must be shorter than 255 characters",
        );

        let amount_due = forms::number(&mut errors, "amount_due", "Amount due", &self.amount_due);

        if let Some(amount) = amount_due {
            errors.check(
                is_non_negative(amount),
                "amount_due",
                "Amount due cannot be negative",
            );
        }

        match (invoice_date, amount_due) {
            (Some(invoice_date), Some(amount_due)) if errors.is_valid() => Ok(InvoiceDetails {
                invoice_date,
                date_paid,
                payment_terms: self.payment_terms.trim().to_string(),
                amount_due,
                display_details: forms::checkbox(self.display_details.as_deref()),
            }),
            _ => Err(errors),
        }
    }
}
