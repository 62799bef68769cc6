//! View Client Handler

use salvo::prelude::*;
use tera::Context;

use billable_app::domain::clients::records::ClientId;

use crate::{
    clients::{errors::into_status_error, views::ClientView},
    extensions::*,
    projects::{self, views::ProjectView},
};

/// Client details with the client's projects.
#[handler]
#[tracing::instrument(
    name = "clients.view",
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

    let client = state
        .app
        .clients
        .get_client(id)
        .await
        .map_err(into_status_error)?;

    let projects: Vec<ProjectView> = state
        .app
        .projects
        .get_projects_by_client(id)
        .await
        .map_err(projects::errors::into_status_error)?
        .iter()
        .map(ProjectView::from)
        .collect();

    let mut context = Context::new();
    context.insert("client", &ClientView::from(&client));
    context.insert("projects", &projects);

    state.templates.write(res, "clients/view.html", &context)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use billable_app::domain::clients::ClientsServiceError;

    use crate::test_helpers::{Mocks, client_record, project_record};

    use super::*;

    #[tokio::test]
    async fn shows_client_and_projects() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .clients
            .expect_get_client()
            .once()
            .withf(|id| *id == ClientId::from_i64(1))
            .return_once(|_| Ok(client_record(1)));

        mocks
            .projects
            .expect_get_projects_by_client()
            .once()
            .withf(|id| *id == ClientId::from_i64(1))
            .return_once(|_| Ok(vec![project_record(5, 1)]));

        let mut res = TestClient::get("http://example.com/client/view/1")
            .send(&mocks.service()?)
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.contains("Acme"));
        assert!(body.contains(r#"href="/project/view/5""#));
        assert!(body.contains("In Progress"));

        Ok(())
    }

    #[tokio::test]
    async fn non_numeric_id_is_404() -> TestResult {
        let res = TestClient::get("http://example.com/client/view/abc")
            .send(&Mocks::default().service()?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn missing_client_is_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .clients
            .expect_get_client()
            .once()
            .return_once(|_| Err(ClientsServiceError::NotFound));

        let res = TestClient::get("http://example.com/client/view/9")
            .send(&mocks.service()?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
