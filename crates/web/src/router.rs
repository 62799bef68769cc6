//! App Router

use salvo::Router;

use crate::{clients, healthcheck, invoices, projects, settings, timesheets};

pub(crate) fn app_router() -> Router {
    Router::new()
        .get(clients::index::handler)
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("client")
                .push(Router::with_path("view/{id}").get(clients::view::handler))
                .push(
                    Router::with_path("create")
                        .get(clients::create::show_form)
                        .post(clients::create::submit),
                )
                .push(
                    Router::with_path("update/{id}")
                        .get(clients::update::show_form)
                        .post(clients::update::submit),
                )
                .push(Router::with_path("delete/{id}").post(clients::delete::handler))
                .push(
                    Router::with_path("{id}/project/create")
                        .get(projects::create::show_form)
                        .post(projects::create::submit),
                ),
        )
        .push(
            Router::with_path("project")
                .push(Router::with_path("view/{id}").get(projects::view::handler))
                .push(
                    Router::with_path("update/{id}")
                        .get(projects::update::show_form)
                        .post(projects::update::submit),
                )
                .push(Router::with_path("delete/{id}").post(projects::delete::handler))
                .push(
                    Router::with_path("{id}/timesheet/create")
                        .get(timesheets::create::show_form)
                        .post(timesheets::create::submit),
                )
                .push(
                    Router::with_path("{id}/invoice/create")
                        .get(invoices::create::show_form)
                        .post(invoices::create::submit),
                ),
        )
        .push(
            Router::with_path("timesheet")
                .push(Router::with_path("view/{id}").get(timesheets::view::handler))
                .push(
                    Router::with_path("update/{id}")
                        .get(timesheets::update::show_form)
                        .post(timesheets::update::submit),
                )
                .push(Router::with_path("delete/{id}").post(timesheets::delete::handler)),
        )
        .push(
            Router::with_path("invoice")
                .push(Router::with_path("view/{id}").get(invoices::view::handler))
                .push(
                    Router::with_path("update/{id}")
                        .get(invoices::update::show_form)
                        .post(invoices::update::submit),
                )
                .push(Router::with_path("delete/{id}").post(invoices::delete::handler))
                .push(Router::with_path("print/{id}").get(invoices::print::handler)),
        )
        .push(
            Router::with_path("settings")
                .get(settings::index::handler)
                .push(
                    Router::with_path("update")
                        .get(settings::update::show_form)
                        .post(settings::update::submit),
                ),
        )
}
