//! Projects Data

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::domain::clients::records::ClientId;

/// Status labels a project can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProjectStatus {
    #[default]
    Estimating,
    InProgress,
    OnHold,
    Complete,
    Cancelled,
}

impl ProjectStatus {
    /// Every status, in the order offered to users.
    pub const ALL: [Self; 5] = [
        Self::Estimating,
        Self::InProgress,
        Self::OnHold,
        Self::Complete,
        Self::Cancelled,
    ];

    /// Human label, also the persisted value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Estimating => "Estimating",
            Self::InProgress => "In Progress",
            Self::OnHold => "On Hold",
            Self::Complete => "Complete",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Every label, in the order offered to users.
    #[must_use]
    pub fn labels() -> [&'static str; 5] {
        Self::ALL.map(Self::label)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown project status {0:?}")]
pub struct UnknownProjectStatus(pub String);

impl FromStr for ProjectStatus {
    type Err = UnknownProjectStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| UnknownProjectStatus(s.to_string()))
    }
}

/// Editable project attributes, used for both inserts and updates.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetails {
    pub name: String,
    pub status: ProjectStatus,
    pub hourly_rate: f64,

    /// Percentage (0-100) taken off every invoice of the project.
    pub discount_percent: Option<f64>,
    pub discount_reason: Option<String>,

    /// Signed flat amount added to every invoice after the discount.
    pub adjustment_amount: Option<f64>,
    pub adjustment_reason: Option<String>,

    /// ISO 4217 code totals are additionally shown in.
    pub currency_display: String,
    pub currency_conversion_rate: f64,

    /// Bill a fixed amount instead of hours worked.
    pub flat_fee_invoice: bool,

    pub notes: Option<String>,
}

impl ProjectDetails {
    /// Base currency of every stored amount.
    pub const BASE_CURRENCY: &'static str = "USD";

    /// Whether invoices also show the total converted to the display currency.
    #[must_use]
    pub fn shows_converted_total(&self) -> bool {
        !self
            .currency_display
            .eq_ignore_ascii_case(Self::BASE_CURRENCY)
            && (self.currency_conversion_rate - 1.0).abs() > f64::EPSILON
    }
}

/// New Project Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub client: ClientId,
    pub details: ProjectDetails,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn details(currency_display: &str, currency_conversion_rate: f64) -> ProjectDetails {
        ProjectDetails {
            name: "Site rebuild".to_string(),
            status: ProjectStatus::InProgress,
            hourly_rate: 100.0,
            discount_percent: None,
            discount_reason: None,
            adjustment_amount: None,
            adjustment_reason: None,
            currency_display: currency_display.to_string(),
            currency_conversion_rate,
            flat_fee_invoice: false,
            notes: None,
        }
    }

    #[test]
    fn status_labels_round_trip() -> TestResult {
        for status in ProjectStatus::ALL {
            assert_eq!(status.label().parse::<ProjectStatus>()?, status);
        }

        assert_eq!(
            "Done".parse::<ProjectStatus>(),
            Err(UnknownProjectStatus("Done".to_string()))
        );

        Ok(())
    }

    #[test]
    fn labels_are_offered_in_order() {
        assert_eq!(
            ProjectStatus::labels(),
            ["Estimating", "In Progress", "On Hold", "Complete", "Cancelled"]
        );
    }

    #[test]
    fn converted_total_needs_foreign_currency_and_rate() {
        assert!(details("EUR", 0.92).shows_converted_total());
        assert!(!details("EUR", 1.0).shows_converted_total());
        assert!(!details("usd", 0.92).shows_converted_total());
    }
}
