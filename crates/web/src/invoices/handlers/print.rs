//! Print Invoice Handler

use salvo::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderValue},
    prelude::*,
};
use tracing::info;

use billable_app::{domain::invoices::records::InvoiceId, pdf::render_invoice_pdf};

use crate::{extensions::*, invoices::errors::statement_status_error};

/// Render the invoice as an inline PDF.
#[handler]
#[tracing::instrument(
    name = "invoices.print",
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

    let bytes = render_invoice_pdf(&statement, &presentation).or_500("failed to render invoice")?;

    let disposition = HeaderValue::from_str(&format!("inline; filename=\"invoice-{id}.pdf\""))
        .or_500("failed to encode content disposition")?;

    info!(invoice_id = %id, bytes = bytes.len(), "printed invoice");

    res.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    res.headers_mut().insert(CONTENT_DISPOSITION, disposition);

    res.write_body(bytes).or_500("failed to write invoice body")
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use billable_app::domain::invoices::InvoicesServiceError;

    use crate::test_helpers::{Mocks, statement_mocks};

    use super::*;

    #[tokio::test]
    async fn responds_with_inline_pdf() -> TestResult {
        let mut res = TestClient::get("http://example.com/invoice/print/7")
            .send(&statement_mocks().service()?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            res.headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("application/pdf")
        );
        assert_eq!(
            res.headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|value| value.to_str().ok()),
            Some(r#"inline; filename="invoice-7.pdf""#)
        );

        let body = res.take_bytes(None).await?;

        assert!(body.starts_with(b"%PDF"));

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

        let res = TestClient::get("http://example.com/invoice/print/7")
            .send(&mocks.service()?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
