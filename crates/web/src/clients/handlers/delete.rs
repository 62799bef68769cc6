//! Delete Client Handler

use salvo::prelude::*;

use billable_app::domain::clients::records::ClientId;

use crate::{clients::errors::into_status_error, extensions::*};

/// Soft-delete a client. Deleting an absent client still redirects home.
#[handler]
#[tracing::instrument(
    name = "clients.delete",
    skip_all,
    fields(client_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: ClientId = req.id_or_404("id")?;

    tracing::Span::current().record("client_id", tracing::field::display(id));

    state
        .app
        .clients
        .soft_delete_client(id)
        .await
        .map_err(into_status_error)?;

    res.see_other("/")
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, location};

    use super::*;

    #[tokio::test]
    async fn deletes_and_redirects_home() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .clients
            .expect_soft_delete_client()
            .once()
            .withf(|id| *id == ClientId::from_i64(4))
            .return_once(|_| Ok(()));

        let res = TestClient::post("http://example.com/client/delete/4")
            .send(&mocks.service()?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SEE_OTHER));
        assert_eq!(location(&res), Some("/"));

        Ok(())
    }

    #[tokio::test]
    async fn get_is_not_allowed() -> TestResult {
        let res = TestClient::get("http://example.com/client/delete/4")
            .send(&Mocks::default().service()?)
            .await;

        assert_ne!(res.status_code, Some(StatusCode::SEE_OTHER));

        Ok(())
    }
}
