//! Invoice Views

use serde::Serialize;

use billable_app::domain::{
    invoices::{InvoiceStatement, records::InvoiceRecord},
    settings::InvoicePresentation,
};

/// Invoice row as listed on its project.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct InvoiceView {
    pub(crate) id: i64,
    pub(crate) project_id: i64,
    pub(crate) invoice_date: String,
    pub(crate) date_paid: Option<String>,
    pub(crate) payment_terms: String,
    pub(crate) amount_due: String,
    pub(crate) display_details: bool,
}

impl From<&InvoiceRecord> for InvoiceView {
    fn from(record: &InvoiceRecord) -> Self {
        let details = &record.details;

        Self {
            id: record.id.into_i64(),
            project_id: record.project.into_i64(),
            invoice_date: details.invoice_date.to_string(),
            date_paid: details.date_paid.map(|date| date.to_string()),
            payment_terms: details.payment_terms.clone(),
            amount_due: format!("{:.2}", details.amount_due),
            display_details: details.display_details,
        }
    }
}

/// Computed totals, formatted with the presentation settings.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct TotalsView {
    pub(crate) total_hours: String,
    pub(crate) subtotal: String,
    pub(crate) discount_percent: Option<String>,
    pub(crate) discount_reason: Option<String>,
    pub(crate) discount_amount: Option<String>,
    pub(crate) subtotal_after_discount: String,
    pub(crate) adjustment_amount: Option<String>,
    pub(crate) adjustment_reason: Option<String>,
    pub(crate) final_total: String,
    pub(crate) avg_rate: String,
    pub(crate) converted_total: Option<String>,
}

impl TotalsView {
    pub(crate) fn new(statement: &InvoiceStatement, presentation: &InvoicePresentation) -> Self {
        let totals = &statement.totals;
        let project = &statement.project.details;
        let discount_percent = project.discount_percent.filter(|percent| *percent > 0.0);

        Self {
            total_hours: presentation.hours(totals.total_hours),
            subtotal: presentation.money(totals.subtotal),
            discount_percent: discount_percent.map(|percent| format!("{percent}%")),
            discount_reason: project.discount_reason.clone(),
            discount_amount: discount_percent.map(|_| presentation.money(totals.discount_amount)),
            subtotal_after_discount: presentation.money(totals.subtotal_after_discount),
            adjustment_amount: project
                .adjustment_amount
                .map(|_| presentation.money(totals.adjustment_amount)),
            adjustment_reason: project.adjustment_reason.clone(),
            final_total: presentation.money(totals.final_total),
            avg_rate: presentation.money(totals.avg_rate),
            converted_total: statement.converted_total().map(|total| {
                billable::money::format_in_currency(total, &project.currency_display)
                    .unwrap_or_else(|| format!("{total:.2} {}", project.currency_display))
            }),
        }
    }
}
