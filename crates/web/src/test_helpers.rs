//! Test helpers.

use std::sync::Arc;

use jiff::{Timestamp, civil::date};
use salvo::{affix_state::inject, prelude::*};
use testresult::TestResult;

use billable_app::{
    context::AppContext,
    domain::{
        clients::{
            MockClientsService,
            data::ClientDetails,
            records::{ClientId, ClientRecord},
        },
        invoices::{
            MockInvoicesService,
            data::InvoiceDetails,
            records::{InvoiceId, InvoiceRecord},
        },
        lifecycle::RecordState,
        projects::{
            MockProjectsService,
            data::{ProjectDetails, ProjectStatus},
            records::{ProjectId, ProjectRecord},
        },
        settings::{MockSettingsService, presentation::defaults},
        timesheets::{
            MockTimesheetsService,
            data::TimesheetDetails,
            records::{TimesheetId, TimesheetRecord},
        },
    },
};

use crate::{router::app_router, state::State, templates::Templates};

/// One mock per service. A mock without expectations fails the test on any call.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) clients: MockClientsService,
    pub(crate) projects: MockProjectsService,
    pub(crate) timesheets: MockTimesheetsService,
    pub(crate) invoices: MockInvoicesService,
    pub(crate) settings: MockSettingsService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> TestResult<Arc<State>> {
        let app = AppContext {
            clients: Arc::new(self.clients),
            projects: Arc::new(self.projects),
            timesheets: Arc::new(self.timesheets),
            invoices: Arc::new(self.invoices),
            settings: Arc::new(self.settings),
        };

        Ok(State::from_app_context(app, Templates::load()?))
    }

    /// The full application router over these mocks.
    pub(crate) fn service(self) -> TestResult<Service> {
        Ok(Service::new(
            Router::new()
                .hoop(inject(self.into_state()?))
                .push(app_router()),
        ))
    }
}

pub(crate) fn location(res: &Response) -> Option<&str> {
    res.headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
}

pub(crate) fn client_details(name: &str) -> ClientDetails {
    ClientDetails {
        name: name.to_string(),
        email: Some("billing@acme.test".to_string()),
        phone: None,
        address: Some("1 Main Street".to_string()),
        default_hourly_rate: 80.0,
        address_on_invoice: true,
        invoice_cc_email: None,
        invoice_cc_description: None,
        notes: None,
    }
}

pub(crate) fn client_record(id: i64) -> ClientRecord {
    ClientRecord {
        id: ClientId::from_i64(id),
        details: client_details("Acme"),
        state: RecordState::Active,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn project_details(name: &str) -> ProjectDetails {
    ProjectDetails {
        name: name.to_string(),
        status: ProjectStatus::InProgress,
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

pub(crate) fn project_record(id: i64, client: i64) -> ProjectRecord {
    ProjectRecord {
        id: ProjectId::from_i64(id),
        client: ClientId::from_i64(client),
        details: project_details("Rebuild"),
        state: RecordState::Active,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn timesheet_record(id: i64, project: i64, hours: f64) -> TimesheetRecord {
    TimesheetRecord {
        id: TimesheetId::from_i64(id),
        project: ProjectId::from_i64(project),
        details: TimesheetDetails {
            work_date: date(2026, 3, 2),
            hours_worked: hours,
            hourly_rate: 100.0,
            description: Some("Development".to_string()),
        },
        state: RecordState::Active,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn invoice_record(id: i64, project: i64, amount_due: f64) -> InvoiceRecord {
    InvoiceRecord {
        id: InvoiceId::from_i64(id),
        project: ProjectId::from_i64(project),
        details: InvoiceDetails {
            invoice_date: date(2026, 4, 1),
            date_paid: None,
            payment_terms: "Net 30".to_string(),
            amount_due,
            display_details: true,
        },
        state: RecordState::Active,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Mocks answering every call made while building and presenting invoice 7.
///
/// Project 2 carries a 12.5% discount and a 75.00 adjustment over 15 hours at 100.00.
pub(crate) fn statement_mocks() -> Mocks {
    let mut mocks = Mocks::default();

    mocks
        .invoices
        .expect_get_invoice()
        .once()
        .withf(|id| *id == InvoiceId::from_i64(7))
        .return_once(|_| Ok(invoice_record(7, 2, 1500.0)));

    mocks.projects.expect_get_project().once().return_once(|_| {
        let mut project = project_record(2, 1);
        project.details.discount_percent = Some(12.5);
        project.details.adjustment_amount = Some(75.0);

        Ok(project)
    });

    mocks
        .clients
        .expect_get_client()
        .once()
        .return_once(|_| Ok(client_record(1)));

    mocks
        .timesheets
        .expect_get_timesheets_by_project()
        .once()
        .return_once(|_| Ok(vec![timesheet_record(10, 2, 10.0), timesheet_record(11, 2, 5.0)]));

    mocks.settings.expect_get_all().returning(|_| Ok(defaults()));

    mocks
}
