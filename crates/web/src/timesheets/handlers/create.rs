//! Create Timesheet Handlers

use jiff::Zoned;
use salvo::prelude::*;
use tera::Context;
use tracing::info;

use billable::validation::FieldErrors;
use billable_app::domain::{
    projects::records::{ProjectId, ProjectRecord},
    timesheets::data::NewTimesheet,
};

use crate::{
    extensions::*,
    projects,
    state::State,
    templates::FormPage,
    timesheets::{errors::into_status_error, form::TimesheetForm},
};

fn page(project: ProjectId) -> FormPage {
    FormPage {
        template: "timesheets/form.html",
        title: "New timesheet".to_string(),
        action: format!("/project/{project}/timesheet/create"),
        cancel: format!("/project/view/{project}"),
    }
}

pub(super) fn form_context(
    page: &FormPage,
    project: &ProjectRecord,
    form: &TimesheetForm,
    errors: &FieldErrors,
) -> Context {
    let mut context = page.context(form, errors);

    context.insert("project_name", &project.details.name);

    context
}

pub(super) async fn load_project(state: &State, id: ProjectId) -> Result<ProjectRecord, StatusError> {
    state
        .app
        .projects
        .get_project(id)
        .await
        .map_err(projects::errors::into_status_error)
}

/// Timesheet form for today at the project's current rate.
#[handler]
#[tracing::instrument(
    name = "timesheets.create.form",
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

    let project = load_project(state, id).await?;
    let form = TimesheetForm::new(Zoned::now().date(), project.details.hourly_rate);
    let page = page(id);

    state.templates.write(
        res,
        page.template,
        &form_context(&page, &project, &form, &FieldErrors::new()),
    )
}

#[handler]
#[tracing::instrument(
    name = "timesheets.create",
    skip_all,
    fields(project_id = tracing::field::Empty, timesheet_id = tracing::field::Empty),
    err
)]
pub(crate) async fn submit(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: ProjectId = req.id_or_404("id")?;

    let span = tracing::Span::current();
    span.record("project_id", tracing::field::display(id));

    let project = load_project(state, id).await?;
    let form: TimesheetForm = req.form_or_400().await?;

    let details = match form.validate() {
        Ok(details) => details,
        Err(errors) => {
            let page = page(id);

            res.status_code(StatusCode::UNPROCESSABLE_ENTITY);

            return state.templates.write(
                res,
                page.template,
                &form_context(&page, &project, &form, &errors),
            );
        }
    };

    let timesheet = state
        .app
        .timesheets
        .insert_timesheet(NewTimesheet {
            project: id,
            details,
        })
        .await
        .map_err(into_status_error)?;

    span.record("timesheet_id", tracing::field::display(timesheet));

    info!(project_id = %id, timesheet_id = %timesheet, "logged timesheet");

    res.see_other(&format!("/project/view/{id}"))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use billable_app::domain::timesheets::records::TimesheetId;

    use crate::test_helpers::{Mocks, location, project_record};

    use super::*;

    fn mocks_with_project(rate: f64) -> Mocks {
        let mut mocks = Mocks::default();

        mocks
            .projects
            .expect_get_project()
            .once()
            .withf(|id| *id == ProjectId::from_i64(2))
            .return_once(move |_| {
                let mut project = project_record(2, 1);
                project.details.hourly_rate = rate;

                Ok(project)
            });

        mocks
    }

    #[tokio::test]
    async fn form_prefills_rate_from_project() -> TestResult {
        let mut res = TestClient::get("http://example.com/project/2/timesheet/create")
            .send(&mocks_with_project(135.0).service()?)
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.contains(r#"name="hourly_rate" value="135""#));

        Ok(())
    }

    #[tokio::test]
    async fn valid_submission_keeps_submitted_rate() -> TestResult {
        let mut mocks = mocks_with_project(135.0);

        mocks
            .timesheets
            .expect_insert_timesheet()
            .once()
            .withf(|timesheet| {
                timesheet.project == ProjectId::from_i64(2)
                    && timesheet.details.work_date == date(2026, 3, 2)
                    && (timesheet.details.hours_worked - 6.0).abs() < f64::EPSILON
                    && (timesheet.details.hourly_rate - 120.0).abs() < f64::EPSILON
            })
            .return_once(|_| Ok(TimesheetId::from_i64(30)));

        let res = TestClient::post("http://example.com/project/2/timesheet/create")
            .form(&[
                ("work_date", "2026-03-02"),
                ("hours_worked", "6"),
                ("hourly_rate", "120"),
                ("description", "Migration"),
            ])
            .send(&mocks.service()?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SEE_OTHER));
        assert_eq!(location(&res), Some("/project/view/2"));

        Ok(())
    }

    #[tokio::test]
    async fn negative_hours_are_422() -> TestResult {
        let mut res = TestClient::post("http://example.com/project/2/timesheet/create")
            .form(&[
                ("work_date", "2026-03-02"),
                ("hours_worked", "-2"),
                ("hourly_rate", "120"),
            ])
            .send(&mocks_with_project(135.0).service()?)
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(body.contains("Hours worked cannot be negative"));

        Ok(())
    }
}
