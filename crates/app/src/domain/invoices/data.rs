//! Invoices Data

use jiff::civil::Date;

use crate::domain::projects::records::ProjectId;

/// Editable invoice attributes, used for both inserts and updates.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDetails {
    pub invoice_date: Date,

    /// `None` while the invoice is unpaid.
    pub date_paid: Option<Date>,

    pub payment_terms: String,

    /// Base amount for the billing period, before discount and adjustment.
    pub amount_due: f64,

    /// Itemize timesheets on the printed invoice instead of a single summary line.
    pub display_details: bool,
}

/// New Invoice Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub project: ProjectId,
    pub details: InvoiceDetails,
}
