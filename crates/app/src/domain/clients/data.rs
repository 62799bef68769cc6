//! Clients Data

/// Editable client attributes, used for both inserts and updates.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDetails {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,

    /// Rate suggested for new projects of this client.
    pub default_hourly_rate: f64,

    /// Print the client's address in the bill-to block of invoices.
    pub address_on_invoice: bool,

    /// Extra recipient shown as a CC line on invoices.
    pub invoice_cc_email: Option<String>,
    pub invoice_cc_description: Option<String>,

    pub notes: Option<String>,
}
