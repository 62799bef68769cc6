//! Invoice Records

use jiff::Timestamp;

use crate::{
    domain::{
        invoices::data::InvoiceDetails, lifecycle::RecordState, projects::records::ProjectId,
    },
    ids::TypedId,
};

/// Invoice Id
pub type InvoiceId = TypedId<InvoiceRecord>;

/// Invoice Record
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceRecord {
    pub id: InvoiceId,
    pub project: ProjectId,
    pub details: InvoiceDetails,
    pub state: RecordState,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl InvoiceRecord {
    #[must_use]
    pub const fn is_paid(&self) -> bool {
        self.details.date_paid.is_some()
    }
}
