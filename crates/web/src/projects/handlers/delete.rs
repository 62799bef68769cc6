//! Delete Project Handler

use salvo::prelude::*;

use billable_app::domain::projects::{ProjectsServiceError, records::ProjectId};

use crate::{extensions::*, projects::errors::into_status_error};

/// Soft-delete a project and go back to its client.
#[handler]
#[tracing::instrument(
    name = "projects.delete",
    skip_all,
    fields(project_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: ProjectId = req.id_or_404("id")?;

    tracing::Span::current().record("project_id", tracing::field::display(id));

    let back = match state.app.projects.get_project(id).await {
        Ok(project) => format!("/client/view/{}", project.client),
        Err(ProjectsServiceError::NotFound) => "/".to_string(),
        Err(error) => return Err(into_status_error(error)),
    };

    state
        .app
        .projects
        .soft_delete_project(id)
        .await
        .map_err(into_status_error)?;

    res.see_other(&back)
}
