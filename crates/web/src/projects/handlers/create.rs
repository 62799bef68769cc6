//! Create Project Handlers

use salvo::prelude::*;
use tera::Context;
use tracing::info;

use billable::validation::FieldErrors;
use billable_app::domain::{
    clients::records::{ClientId, ClientRecord},
    projects::data::{NewProject, ProjectStatus},
};

use crate::{
    clients,
    extensions::*,
    projects::{errors::into_status_error, form::ProjectForm},
    state::State,
    templates::FormPage,
};

fn page(client: ClientId) -> FormPage {
    FormPage {
        template: "projects/form.html",
        title: "New project".to_string(),
        action: format!("/client/{client}/project/create"),
        cancel: format!("/client/view/{client}"),
    }
}

pub(super) fn form_context(
    page: &FormPage,
    client: &ClientRecord,
    form: &ProjectForm,
    errors: &FieldErrors,
) -> Context {
    let mut context = page.context(form, errors);

    context.insert("client_name", &client.details.name);
    context.insert("statuses", &ProjectStatus::labels());

    context
}

async fn load_client(state: &State, client: ClientId) -> Result<ClientRecord, StatusError> {
    state
        .app
        .clients
        .get_client(client)
        .await
        .map_err(clients::errors::into_status_error)
}

/// Empty project form billing at the client's default rate.
#[handler]
#[tracing::instrument(
    name = "projects.create.form",
    skip_all,
    fields(client_id = tracing::field::Empty),
    err
)]
pub(crate) async fn show_form(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: ClientId = req.id_or_404("id")?;

    tracing::Span::current().record("client_id", tracing::field::display(id));

    let client = load_client(state, id).await?;
    let form = ProjectForm::with_rate(client.details.default_hourly_rate);
    let page = page(id);

    state.templates.write(
        res,
        page.template,
        &form_context(&page, &client, &form, &FieldErrors::new()),
    )
}

#[handler]
#[tracing::instrument(
    name = "projects.create",
    skip_all,
    fields(client_id = tracing::field::Empty, project_id = tracing::field::Empty),
    err
)]
pub(crate) async fn submit(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: ClientId = req.id_or_404("id")?;

    let span = tracing::Span::current();
    span.record("client_id", tracing::field::display(id));

    let client = load_client(state, id).await?;
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

    let project = state
        .app
        .projects
        .insert_project(NewProject {
            client: id,
            details,
        })
        .await
        .map_err(into_status_error)?;

    span.record("project_id", tracing::field::display(project));

    info!(client_id = %id, project_id = %project, "created project");

    res.see_other(&format!("/project/view/{project}"))
}
