//! Delete Invoice Handler

use salvo::prelude::*;

use billable_app::domain::invoices::{InvoicesServiceError, records::InvoiceId};

use crate::{extensions::*, invoices::errors::into_status_error};

/// Soft-delete an invoice and go back to its project.
#[handler]
#[tracing::instrument(
    name = "invoices.delete",
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

    let back = match state.app.invoices.get_invoice(id).await {
        Ok(invoice) => format!("/project/view/{}", invoice.project),
        Err(InvoicesServiceError::NotFound) => "/".to_string(),
        Err(error) => return Err(into_status_error(error)),
    };

    state
        .app
        .invoices
        .soft_delete_invoice(id)
        .await
        .map_err(into_status_error)?;

    res.see_other(&back)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, invoice_record, location};

    use super::*;

    #[tokio::test]
    async fn deletes_and_redirects_to_project() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .invoices
            .expect_get_invoice()
            .once()
            .return_once(|_| Ok(invoice_record(7, 2, 1500.0)));

        mocks
            .invoices
            .expect_soft_delete_invoice()
            .once()
            .withf(|id| *id == InvoiceId::from_i64(7))
            .return_once(|_| Ok(()));

        let res = TestClient::post("http://example.com/invoice/delete/7")
            .send(&mocks.service()?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SEE_OTHER));
        assert_eq!(location(&res), Some("/project/view/2"));

        Ok(())
    }
}
