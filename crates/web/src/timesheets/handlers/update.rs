//! Update Timesheet Handlers

use salvo::prelude::*;
use tracing::info;

use billable::validation::FieldErrors;
use billable_app::domain::{
    projects::records::ProjectRecord,
    timesheets::records::{TimesheetId, TimesheetRecord},
};

use crate::{
    extensions::*,
    state::State,
    templates::FormPage,
    timesheets::{
        errors::into_status_error,
        form::TimesheetForm,
        handlers::create::{form_context, load_project},
    },
};

fn page(timesheet: TimesheetId) -> FormPage {
    FormPage {
        template: "timesheets/form.html",
        title: "Edit timesheet".to_string(),
        action: format!("/timesheet/update/{timesheet}"),
        cancel: format!("/timesheet/view/{timesheet}"),
    }
}

async fn load(
    state: &State,
    id: TimesheetId,
) -> Result<(TimesheetRecord, ProjectRecord), StatusError> {
    let timesheet = state
        .app
        .timesheets
        .get_timesheet(id)
        .await
        .map_err(into_status_error)?;

    let project = load_project(state, timesheet.project).await?;

    Ok((timesheet, project))
}

#[handler]
#[tracing::instrument(
    name = "timesheets.update.form",
    skip_all,
    fields(timesheet_id = tracing::field::Empty),
    err
)]
pub(crate) async fn show_form(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: TimesheetId = req.id_or_404("id")?;

    tracing::Span::current().record("timesheet_id", tracing::field::display(id));

    let (timesheet, project) = load(state, id).await?;
    let page = page(id);

    state.templates.write(
        res,
        page.template,
        &form_context(
            &page,
            &project,
            &TimesheetForm::from_details(&timesheet.details),
            &FieldErrors::new(),
        ),
    )
}

#[handler]
#[tracing::instrument(
    name = "timesheets.update",
    skip_all,
    fields(timesheet_id = tracing::field::Empty),
    err
)]
pub(crate) async fn submit(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: TimesheetId = req.id_or_404("id")?;

    tracing::Span::current().record("timesheet_id", tracing::field::display(id));

    let (_, project) = load(state, id).await?;
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

    state
        .app
        .timesheets
        .update_timesheet(id, details)
        .await
        .map_err(into_status_error)?;

    info!(timesheet_id = %id, "updated timesheet");

    res.see_other(&format!("/timesheet/view/{id}"))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use billable_app::domain::timesheets::TimesheetsServiceError;

    use crate::test_helpers::{Mocks, location, project_record, timesheet_record};

    use super::*;

    fn mocks_with_timesheet() -> Mocks {
        let mut mocks = Mocks::default();

        mocks
            .timesheets
            .expect_get_timesheet()
            .once()
            .return_once(|_| Ok(timesheet_record(10, 2, 7.5)));

        mocks
            .projects
            .expect_get_project()
            .once()
            .return_once(|_| Ok(project_record(2, 1)));

        mocks
    }

    #[tokio::test]
    async fn form_shows_stored_values() -> TestResult {
        let mut res = TestClient::get("http://example.com/timesheet/update/10")
            .send(&mocks_with_timesheet().service()?)
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.contains(r#"name="work_date" value="2026-03-02""#));
        assert!(body.contains(r#"name="hours_worked" value="7.5""#));

        Ok(())
    }

    #[tokio::test]
    async fn valid_submission_updates_and_redirects() -> TestResult {
        let mut mocks = mocks_with_timesheet();

        mocks
            .timesheets
            .expect_update_timesheet()
            .once()
            .withf(|id, details| {
                *id == TimesheetId::from_i64(10) && details.work_date == date(2026, 3, 3)
            })
            .return_once(|_, _| Ok(()));

        let res = TestClient::post("http://example.com/timesheet/update/10")
            .form(&[
                ("work_date", "2026-03-03"),
                ("hours_worked", "7.5"),
                ("hourly_rate", "100"),
            ])
            .send(&mocks.service()?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SEE_OTHER));
        assert_eq!(location(&res), Some("/timesheet/view/10"));

        Ok(())
    }

    #[tokio::test]
    async fn unparseable_date_is_422() -> TestResult {
        let mut res = TestClient::post("http://example.com/timesheet/update/10")
            .form(&[
                ("work_date", "03/03/2026"),
                ("hours_worked", "7.5"),
                ("hourly_rate", "100"),
            ])
            .send(&mocks_with_timesheet().service()?)
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(body.contains("Work date must be a date (YYYY-MM-DD)"));

        Ok(())
    }

    #[tokio::test]
    async fn missing_timesheet_is_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .timesheets
            .expect_get_timesheet()
            .once()
            .return_once(|_| Err(TimesheetsServiceError::NotFound));

        let res = TestClient::get("http://example.com/timesheet/update/10")
            .send(&mocks.service()?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
