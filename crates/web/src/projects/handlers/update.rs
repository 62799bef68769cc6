//! Update Project Handlers

use salvo::prelude::*;
use tracing::info;

use billable::validation::FieldErrors;
use billable_app::domain::{
    clients::records::ClientRecord,
    projects::records::{ProjectId, ProjectRecord},
};

use crate::{
    clients,
    extensions::*,
    projects::{errors::into_status_error, form::ProjectForm, handlers::create::form_context},
    state::State,
    templates::FormPage,
};

fn page(project: ProjectId) -> FormPage {
    FormPage {
        template: "projects/form.html",
        title: "Edit project".to_string(),
        action: format!("/project/update/{project}"),
        cancel: format!("/project/view/{project}"),
    }
}

async fn load(state: &State, id: ProjectId) -> Result<(ProjectRecord, ClientRecord), StatusError> {
    let project = state
        .app
        .projects
        .get_project(id)
        .await
        .map_err(into_status_error)?;

    let client = state
        .app
        .clients
        .get_client(project.client)
        .await
        .map_err(clients::errors::into_status_error)?;

    Ok((project, client))
}

#[handler]
#[tracing::instrument(
    name = "projects.update.form",
    skip_all,
    fields(project_id = tracing::field::Empty),
    err
)]
pub(crate) async fn show_form(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: ProjectId = req.id_or_404("id")?;

    tracing::Span::current().record("project_id", tracing::field::display(id));

    let (project, client) = load(state, id).await?;
    let page = page(id);

    state.templates.write(
        res,
        page.template,
        &form_context(
            &page,
            &client,
            &ProjectForm::from_details(&project.details),
            &FieldErrors::new(),
        ),
    )
}

#[handler]
#[tracing::instrument(
    name = "projects.update",
    skip_all,
    fields(project_id = tracing::field::Empty),
    err
)]
pub(crate) async fn submit(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: ProjectId = req.id_or_404("id")?;

    tracing::Span::current().record("project_id", tracing::field::display(id));

    let (_, client) = load(state, id).await?;
    let form: ProjectForm = req.form_or_400().await?;

    let details = match form.validate() {
        Ok(details) => details,
        Err(errors) => {
            let page = page(id);

            res.status_code(StatusCode::UNPROCESSABLE_ENTITY);

            return state.templates.write(
                res,
                page.template,
                &form_context(&page, &client, &form, &errors),
            );
        }
    };

    state
        .app
        .projects
        .update_project(id, details)
        .await
        .map_err(into_status_error)?;

    info!(project_id = %id, "updated project");

    res.see_other(&format!("/project/view/{id}"))
}
