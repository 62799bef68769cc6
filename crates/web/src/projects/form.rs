//! Project Form

use billable::validation::{
    FieldErrors, in_range, is_non_negative, max_chars, not_blank, permitted_value,
};
use billable_app::domain::projects::data::{ProjectDetails, ProjectStatus};
use serde::{Deserialize, Serialize};

use crate::forms;

const MAX_TEXT: usize = 255;

/// Submitted project fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ProjectForm {
    pub(crate) name: String,
    pub(crate) status: String,
    pub(crate) hourly_rate: String,
    pub(crate) discount_percent: String,
    pub(crate) discount_reason: String,
    pub(crate) adjustment_amount: String,
    pub(crate) adjustment_reason: String,
    pub(crate) currency_display: String,
    pub(crate) currency_conversion_rate: String,
    pub(crate) flat_fee_invoice: Option<String>,
    pub(crate) notes: String,
}

impl ProjectForm {
    /// New project form billing at the client's default rate.
    pub(crate) fn with_rate(hourly_rate: f64) -> Self {
        Self {
            status: ProjectStatus::default().label().to_string(),
            hourly_rate: forms::number_text(hourly_rate),
            currency_display: ProjectDetails::BASE_CURRENCY.to_string(),
            currency_conversion_rate: "1".to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn from_details(details: &ProjectDetails) -> Self {
        Self {
            name: details.name.clone(),
            status: details.status.label().to_string(),
            hourly_rate: forms::number_text(details.hourly_rate),
            discount_percent: details
                .discount_percent
                .map(forms::number_text)
                .unwrap_or_default(),
            discount_reason: forms::text_or_blank(details.discount_reason.as_ref()),
            adjustment_amount: details
                .adjustment_amount
                .map(forms::number_text)
                .unwrap_or_default(),
            adjustment_reason: forms::text_or_blank(details.adjustment_reason.as_ref()),
            currency_display: details.currency_display.clone(),
            currency_conversion_rate: forms::number_text(details.currency_conversion_rate),
            flat_fee_invoice: details.flat_fee_invoice.then(|| "on".to_string()),
            notes: forms::text_or_blank(details.notes.as_ref()),
        }
    }

    pub(crate) fn validate(&self) -> Result<ProjectDetails, FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.check(not_blank(&self.name), "name", "Name cannot be blank");
        errors.check(
            max_chars(&self.name, MAX_TEXT),
            "name",
            "Name must be shorter than 255 characters",
        );

        let labels = ProjectStatus::labels();

        errors.check(
            permitted_value(&self.status.as_str(), &labels),
            "status",
            format!("Status must be one of: {}", labels.join(", ")),
        );

        let hourly_rate = forms::number(&mut errors, "hourly_rate", "Hourly rate", &self.hourly_rate);

        if let Some(rate) = hourly_rate {
            errors.check(
                is_non_negative(rate),
                "hourly_rate",
                "Hourly rate cannot be negative",
            );
        }

        let discount_percent = forms::optional_number(
            &mut errors,
            "discount_percent",
            "Discount",
            &self.discount_percent,
        );

        if let Some(percent) = discount_percent {
            errors.check(
                in_range(percent, 0.0, 100.0),
                "discount_percent",
                "Discount must be between 0 and 100",
            );
        }

        errors.check(
            max_chars(&self.discount_reason, MAX_TEXT),
            "discount_reason",
            "Discount reason must be shorter than 255 characters",
        );

        let adjustment_amount = forms::optional_number(
            &mut errors,
            "adjustment_amount",
            "Adjustment",
            &self.adjustment_amount,
        );

        errors.check(
            max_chars(&self.adjustment_reason, MAX_TEXT),
            "adjustment_reason",
            "Adjustment reason must be shorter than 255 characters",
        );

        let currency = self.currency_display.trim().to_ascii_uppercase();

        errors.check(
            currency.len() == 3 && currency.bytes().all(|byte| byte.is_ascii_uppercase()),
            "currency_display",
            "Currency must be a three letter code",
        );

        let conversion_rate = forms::number(
            &mut errors,
            "currency_conversion_rate",
            "Conversion rate",
            &self.currency_conversion_rate,
        );

        if let Some(rate) = conversion_rate {
            errors.check(
                rate > 0.0,
                "currency_conversion_rate",
                "Conversion rate must be greater than zero",
            );
        }

        errors.into_result()?;

        Ok(ProjectDetails {
            name: self.name.trim().to_string(),
            status: self.status.parse().unwrap_or_default(),
            hourly_rate: hourly_rate.unwrap_or_default(),
            discount_percent,
            discount_reason: forms::optional_text(&self.discount_reason),
            adjustment_amount,
            adjustment_reason: forms::optional_text(&self.adjustment_reason),
            currency_display: currency,
            currency_conversion_rate: conversion_rate.unwrap_or(1.0),
            flat_fee_invoice: forms::checkbox(self.flat_fee_invoice.as_deref()),
            notes: forms::optional_text(&self.notes),
        })
    }
}
