//! Project Views

use serde::Serialize;

use billable_app::domain::projects::records::ProjectRecord;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProjectView {
    pub(crate) id: i64,
    pub(crate) client_id: i64,
    pub(crate) name: String,
    pub(crate) status: &'static str,
    pub(crate) hourly_rate: String,
    pub(crate) discount_percent: Option<String>,
    pub(crate) discount_reason: Option<String>,
    pub(crate) adjustment_amount: Option<String>,
    pub(crate) adjustment_reason: Option<String>,
    pub(crate) currency_display: String,
    pub(crate) currency_conversion_rate: String,
    pub(crate) flat_fee_invoice: bool,
    pub(crate) notes: Option<String>,
}

impl From<&ProjectRecord> for ProjectView {
    fn from(record: &ProjectRecord) -> Self {
        let details = &record.details;

        Self {
            id: record.id.into_i64(),
            client_id: record.client.into_i64(),
            name: details.name.clone(),
            status: details.status.label(),
            hourly_rate: format!("{:.2}", details.hourly_rate),
            discount_percent: details.discount_percent.map(|percent| format!("{percent}%")),
            discount_reason: details.discount_reason.clone(),
            adjustment_amount: details.adjustment_amount.map(|amount| format!("{amount:.2}")),
            adjustment_reason: details.adjustment_reason.clone(),
            currency_display: details.currency_display.clone(),
            currency_conversion_rate: details.currency_conversion_rate.to_string(),
            flat_fee_invoice: details.flat_fee_invoice,
            notes: details.notes.clone(),
        }
    }
}
