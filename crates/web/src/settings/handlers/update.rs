//! Update Setting Handlers

use salvo::prelude::*;
use tera::Context;
use tracing::info;

use billable::{settings::SettingType, validation::FieldErrors};
use billable_app::domain::settings::SettingsServiceError;

use crate::{
    extensions::*,
    settings::{
        errors::into_status_error,
        form::{SettingForm, value_message},
    },
    state::State,
};

const TEMPLATE: &str = "settings/form.html";

fn form_context(form: &SettingForm, data_type: SettingType, errors: &FieldErrors) -> Context {
    let mut context = Context::new();

    context.insert("title", &format!("Edit {}", form.key));
    context.insert("action", "/settings/update");
    context.insert("cancel", "/settings");
    context.insert("form", form);
    context.insert("data_type", data_type.as_str());
    context.insert("errors", errors);

    context
}

async fn current(state: &State, key: &str) -> Result<(String, SettingType), StatusError> {
    let raw = state
        .app
        .settings
        .get_value(key)
        .await
        .map_err(into_status_error)?;

    Ok((raw.as_str().to_string(), raw.data_type()))
}

/// Edit form for `?key=`.
#[handler]
#[tracing::instrument(
    name = "settings.update.form",
    skip_all,
    fields(key = tracing::field::Empty),
    err
)]
pub(crate) async fn show_form(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;

    let key = req
        .query::<String>("key")
        .ok_or_else(|| StatusError::not_found().brief("Setting not found"))?;

    tracing::Span::current().record("key", key.as_str());

    let (value, data_type) = current(state, &key).await?;

    state.templates.write(
        res,
        TEMPLATE,
        &form_context(&SettingForm { key, value }, data_type, &FieldErrors::new()),
    )
}

#[handler]
#[tracing::instrument(
    name = "settings.update",
    skip_all,
    fields(key = tracing::field::Empty),
    err
)]
pub(crate) async fn submit(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let form: SettingForm = req.form_or_400().await?;

    tracing::Span::current().record("key", form.key.as_str());

    let (_, data_type) = current(state, &form.key).await?;

    match state.app.settings.update_value(&form.key, &form.value).await {
        Ok(value) => {
            info!(key = %form.key, %value, "updated setting");

            res.see_other("/settings")
        }
        Err(SettingsServiceError::InvalidValue(error)) => {
            let mut errors = FieldErrors::new();
            errors.insert_if_absent("value", value_message(data_type, &error));

            res.status_code(StatusCode::UNPROCESSABLE_ENTITY);

            state
                .templates
                .write(res, TEMPLATE, &form_context(&form, data_type, &errors))
        }
        Err(error) => Err(into_status_error(error)),
    }
}

#[cfg(test)]
mod tests {
    use billable::settings::{RawSetting, SettingError, SettingValue};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, location};

    use super::*;

    fn mocks_with_int_setting() -> Mocks {
        let mut mocks = Mocks::default();

        mocks
            .settings
            .expect_get_value()
            .once()
            .returning(|_| Ok(RawSetting::new("2", SettingType::Int)));

        mocks
    }

    #[tokio::test]
    async fn form_shows_current_value() -> TestResult {
        let mut res = TestClient::get("http://example.com/settings/update?key=hours_decimal_places")
            .send(&mocks_with_int_setting().service()?)
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.contains(r#"name="key" value="hours_decimal_places""#));
        assert!(body.contains(r#"name="value" value="2""#));

        Ok(())
    }

    #[tokio::test]
    async fn form_without_key_is_404() -> TestResult {
        let res = TestClient::get("http://example.com/settings/update")
            .send(&Mocks::default().service()?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn valid_value_redirects_to_list() -> TestResult {
        let mut mocks = mocks_with_int_setting();

        mocks
            .settings
            .expect_update_value()
            .once()
            .returning(|_, _| Ok(SettingValue::Int(3)));

        let res = TestClient::post("http://example.com/settings/update")
            .form(&[("key", "hours_decimal_places"), ("value", "3")])
            .send(&mocks.service()?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SEE_OTHER));
        assert_eq!(location(&res), Some("/settings"));

        Ok(())
    }

    #[tokio::test]
    async fn mistyped_value_is_422() -> TestResult {
        let mut mocks = mocks_with_int_setting();

        mocks.settings.expect_update_value().once().returning(|_, value| {
            Err(SettingsServiceError::InvalidValue(SettingError::Parse {
                data_type: SettingType::Int,
                value: value.to_string(),
            }))
        });

        let mut res = TestClient::post("http://example.com/settings/update")
            .form(&[("key", "hours_decimal_places"), ("value", "two")])
            .send(&mocks.service()?)
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(body.contains("Value must be a whole number"));
        assert!(body.contains(r#"name="value" value="two""#));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_key_is_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .settings
            .expect_get_value()
            .once()
            .returning(|_| Err(SettingsServiceError::NotFound));

        let res = TestClient::post("http://example.com/settings/update")
            .form(&[("key", "nope"), ("value", "1")])
            .send(&mocks.service()?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
