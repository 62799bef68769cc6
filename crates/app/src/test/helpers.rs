//! Test Helpers

use jiff::civil::Date;
use testresult::TestResult;

use crate::{
    domain::{
        clients::{ClientsService, data::ClientDetails},
        invoices::data::InvoiceDetails,
        projects::{
            ProjectsService,
            data::{NewProject, ProjectDetails, ProjectStatus},
            records::ProjectId,
        },
        timesheets::data::TimesheetDetails,
    },
    test::TestContext,
};

pub(crate) fn client_details(name: &str) -> ClientDetails {
    ClientDetails {
        name: name.to_string(),
        email: Some("billing@example.com".to_string()),
        phone: None,
        address: Some("1 Main Street\nSpringfield".to_string()),
        default_hourly_rate: 75.0,
        address_on_invoice: false,
        invoice_cc_email: None,
        invoice_cc_description: None,
        notes: None,
    }
}

pub(crate) fn project_details(name: &str) -> ProjectDetails {
    ProjectDetails {
        name: name.to_string(),
        status: ProjectStatus::Estimating,
        hourly_rate: 100.0,
        discount_percent: None,
        discount_reason: None,
        adjustment_amount: None,
        adjustment_reason: None,
        currency_display: ProjectDetails::BASE_CURRENCY.to_string(),
        currency_conversion_rate: 1.0,
        flat_fee_invoice: false,
        notes: None,
    }
}

pub(crate) fn timesheet_details(work_date: Date, hours: f64, rate: f64) -> TimesheetDetails {
    TimesheetDetails {
        work_date,
        hours_worked: hours,
        hourly_rate: rate,
        description: Some("Development".to_string()),
    }
}

pub(crate) fn invoice_details(invoice_date: Date, amount_due: f64) -> InvoiceDetails {
    InvoiceDetails {
        invoice_date,
        date_paid: None,
        payment_terms: "Net 30".to_string(),
        amount_due,
        display_details: true,
    }
}

/// Insert a client named after the project, then the project itself.
pub(crate) async fn insert_project(ctx: &TestContext, name: &str) -> TestResult<ProjectId> {
    let client = ctx
        .clients
        .insert_client(client_details(&format!("{name} Client")))
        .await?;

    let project = ctx
        .projects
        .insert_project(NewProject {
            client,
            details: project_details(name),
        })
        .await?;

    Ok(project)
}
