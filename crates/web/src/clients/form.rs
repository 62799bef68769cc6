//! Client Form

use billable::validation::{FieldErrors, is_non_negative, max_chars, not_blank};
use billable_app::domain::clients::data::ClientDetails;
use serde::{Deserialize, Serialize};

use crate::forms;

const MAX_TEXT: usize = 255;

/// Submitted client fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ClientForm {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) address: String,
    pub(crate) default_hourly_rate: String,
    pub(crate) address_on_invoice: Option<String>,
    pub(crate) invoice_cc_email: String,
    pub(crate) invoice_cc_description: String,
    pub(crate) notes: String,
}

impl ClientForm {
    /// Empty form with the rate prefilled.
    pub(crate) fn with_rate(default_hourly_rate: f64) -> Self {
        Self {
            default_hourly_rate: forms::number_text(default_hourly_rate),
            ..Self::default()
        }
    }

    /// Form showing stored details.
    pub(crate) fn from_details(details: &ClientDetails) -> Self {
        Self {
            name: details.name.clone(),
            email: forms::text_or_blank(details.email.as_ref()),
            phone: forms::text_or_blank(details.phone.as_ref()),
            address: forms::text_or_blank(details.address.as_ref()),
            default_hourly_rate: forms::number_text(details.default_hourly_rate),
            address_on_invoice: details.address_on_invoice.then(|| "on".to_string()),
            invoice_cc_email: forms::text_or_blank(details.invoice_cc_email.as_ref()),
            invoice_cc_description: forms::text_or_blank(details.invoice_cc_description.as_ref()),
            notes: forms::text_or_blank(details.notes.as_ref()),
        }
    }

    /// Check every field, then convert.
    pub(crate) fn validate(&self) -> Result<ClientDetails, FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.check(not_blank(&self.name), "name", "Name cannot be blank");
        errors.check(
            max_chars(&self.name, MAX_TEXT),
            "name",
            "Name must be shorter than 255 characters",
        );
        errors.check(
            max_chars(&self.email, MAX_TEXT),
            "email",
            "Email must be shorter than 255 characters",
        );
        errors.check(
            max_chars(&self.phone, MAX_TEXT),
            "phone",
            "Phone must be shorter than 255 characters",
        );
        errors.check(
            max_chars(&self.invoice_cc_email, MAX_TEXT),
            "invoice_cc_email",
            "CC email must be shorter than 255 characters",
        );
        errors.check(
            max_chars(&self.invoice_cc_description, MAX_TEXT),
            "invoice_cc_description",
            "CC description must be shorter than 255 characters",
        );

        let rate = forms::number(
            &mut errors,
            "default_hourly_rate",
            "Default hourly rate",
            &self.default_hourly_rate,
        );

        if let Some(rate) = rate {
            errors.check(
                is_non_negative(rate),
                "default_hourly_rate",
                "Default hourly rate cannot be negative",
            );
        }

        errors.into_result()?;

        Ok(ClientDetails {
            name: self.name.trim().to_string(),
            email: forms::optional_text(&self.email),
            phone: forms::optional_text(&self.phone),
            address: forms::optional_text(&self.address),
            default_hourly_rate: rate.unwrap_or_default(),
            address_on_invoice: forms::checkbox(self.address_on_invoice.as_deref()),
            invoice_cc_email: forms::optional_text(&self.invoice_cc_email),
            invoice_cc_description: forms::optional_text(&self.invoice_cc_description),
            notes: forms::optional_text(&self.notes),
        })
    }
}
