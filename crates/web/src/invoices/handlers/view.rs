//! View Invoice Handler

use salvo::prelude::*;
use tera::Context;

use billable_app::domain::invoices::records::InvoiceId;

use crate::{
    clients::views::ClientView,
    extensions::*,
    invoices::{
        errors::statement_status_error,
        views::{InvoiceView, TotalsView},
    },
    projects::views::ProjectView,
    timesheets::views::TimesheetView,
};

/// Invoice with its project, client, timesheets and computed totals.
#[handler]
#[tracing::instrument(
    name = "invoices.view",
    skip_all,
    fields(invoice_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: InvoiceId = req.id_or_404("id")?;

    tracing::Span::current().record("invoice_id", tracing::field::display(id));

    let statement = state
        .app
        .statements()
        .build(id)
        .await
        .map_err(statement_status_error)?;

    let presentation = state.presentation().await?;

    let timesheets: Vec<TimesheetView> = statement
        .timesheets
        .iter()
        .map(TimesheetView::from)
        .collect();

    let mut context = Context::new();
    context.insert("invoice", &InvoiceView::from(&statement.invoice));
    context.insert("project", &ProjectView::from(&statement.project));
    context.insert("client", &ClientView::from(&statement.client));
    context.insert("timesheets", &timesheets);
    context.insert("totals", &TotalsView::new(&statement, &presentation));

    state.templates.write(res, "invoices/view.html", &context)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use billable_app::domain::{clients::ClientsServiceError, invoices::InvoicesServiceError};

    use crate::test_helpers::{Mocks, invoice_record, project_record, statement_mocks};

    use super::*;

    #[tokio::test]
    async fn shows_computed_totals() -> TestResult {
        let mut res = TestClient::get("http://example.com/invoice/view/7")
            .send(&statement_mocks().service()?)
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.contains("$1,387.50"));
        assert!(body.contains("$187.50"));
        assert!(body.contains(r#"href="/invoice/print/7""#));
        assert!(body.contains(r#"href="/timesheet/view/11""#));

        Ok(())
    }

    #[tokio::test]
    async fn missing_invoice_is_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .invoices
            .expect_get_invoice()
            .once()
            .return_once(|_| Err(InvoicesServiceError::NotFound));

        let res = TestClient::get("http://example.com/invoice/view/7")
            .send(&mocks.service()?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn deleted_client_is_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .invoices
            .expect_get_invoice()
            .once()
            .return_once(|_| Ok(invoice_record(7, 2, 1500.0)));

        mocks
            .projects
            .expect_get_project()
            .once()
            .return_once(|_| Ok(project_record(2, 1)));

        mocks
            .clients
            .expect_get_client()
            .once()
            .return_once(|_| Err(ClientsServiceError::NotFound));

        let res = TestClient::get("http://example.com/invoice/view/7")
            .send(&mocks.service()?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
