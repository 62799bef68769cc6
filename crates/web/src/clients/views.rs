//! Client Views

use serde::Serialize;

use billable_app::domain::clients::records::ClientRecord;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ClientView {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) email: Option<String>,
    pub(crate) phone: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) default_hourly_rate: String,
    pub(crate) address_on_invoice: bool,
    pub(crate) invoice_cc_email: Option<String>,
    pub(crate) invoice_cc_description: Option<String>,
    pub(crate) notes: Option<String>,
}

impl From<&ClientRecord> for ClientView {
    fn from(record: &ClientRecord) -> Self {
        let details = &record.details;

        Self {
            id: record.id.into_i64(),
            name: details.name.clone(),
            email: details.email.clone(),
            phone: details.phone.clone(),
            address: details.address.clone(),
            default_hourly_rate: format!("{:.2}", details.default_hourly_rate),
            address_on_invoice: details.address_on_invoice,
            invoice_cc_email: details.invoice_cc_email.clone(),
            invoice_cc_description: details.invoice_cc_description.clone(),
            notes: details.notes.clone(),
        }
    }
}
