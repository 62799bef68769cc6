//! HTML templates
//!
//! Templates are compiled into the binary and parsed once at startup.

use salvo::prelude::{Response, StatusError, Text};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::error;

use billable::validation::FieldErrors;

const TEMPLATES: [(&str, &str); 12] = [
    ("base.html", include_str!("../templates/base.html")),
    ("clients/index.html", include_str!("../templates/clients/index.html")),
    ("clients/view.html", include_str!("../templates/clients/view.html")),
    ("clients/form.html", include_str!("../templates/clients/form.html")),
    ("projects/view.html", include_str!("../templates/projects/view.html")),
    ("projects/form.html", include_str!("../templates/projects/form.html")),
    ("timesheets/view.html", include_str!("../templates/timesheets/view.html")),
    ("timesheets/form.html", include_str!("../templates/timesheets/form.html")),
    ("invoices/view.html", include_str!("../templates/invoices/view.html")),
    ("invoices/form.html", include_str!("../templates/invoices/form.html")),
    ("settings/index.html", include_str!("../templates/settings/index.html")),
    ("settings/form.html", include_str!("../templates/settings/form.html")),
];

#[derive(Clone, Debug)]
pub(crate) struct Templates {
    tera: Tera,
}

impl Templates {
    /// Parse every embedded template.
    pub(crate) fn load() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();

        tera.add_raw_templates(TEMPLATES)?;

        Ok(Self { tera })
    }

    pub(crate) fn render(&self, name: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(name, context)
    }

    /// Render `name` into the response body as HTML.
    pub(crate) fn write(
        &self,
        res: &mut Response,
        name: &str,
        context: &Context,
    ) -> Result<(), StatusError> {
        let body = self.render(name, context).map_err(|source| {
            error!(template = name, "failed to render template: {source:?}");

            StatusError::internal_server_error()
        })?;

        res.render(Text::Html(body));

        Ok(())
    }
}

/// A form page: which template shows it and where it submits to.
#[derive(Debug)]
pub(crate) struct FormPage {
    pub(crate) template: &'static str,
    pub(crate) title: String,
    pub(crate) action: String,
    pub(crate) cancel: String,
}

impl FormPage {
    /// Context with the submitted values and any field errors.
    pub(crate) fn context<F: Serialize>(&self, form: &F, errors: &FieldErrors) -> Context {
        let mut context = Context::new();

        context.insert("title", &self.title);
        context.insert("action", &self.action);
        context.insert("cancel", &self.cancel);
        context.insert("form", form);
        context.insert("errors", errors);

        context
    }
}
