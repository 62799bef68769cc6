//! Request-level logging and request IDs.

mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::Instrument as _;
use tracing::{error, info, warn};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Wraps each request in an `http.request` span and logs how it ended.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RequestLogging {
    slow_threshold: Duration,
}

impl RequestLogging {
    pub(crate) fn new(slow_threshold: Duration) -> Self {
        Self { slow_threshold }
    }
}

#[handler]
impl RequestLogging {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let started = Instant::now();

        let request_id =
            request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

        depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

        request_ids::set_request_id_header(res, &request_id);

        let method = req.method().to_string();
        let path = req.uri().path().to_owned();
        let route = spans::normalise_path(&path);

        let span = tracing::info_span!(
            parent: None,
            "http.request",
            request_id = %request_id,
            method = %method,
            route = %route,
            remote_addr = %req.remote_addr(),
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        );

        ctrl.call_next(req, depot, res)
            .instrument(span.clone())
            .await;

        let elapsed = started.elapsed();
        let duration_ms = elapsed.as_millis();
        let status = request_ids::response_status_or_ok(res.status_code).as_u16();

        span.record("status", status);
        span.record("duration_ms", duration_ms);

        span.in_scope(|| {
            match status {
                500.. => error!(status, duration_ms, path = %path, "request failed"),
                400..=499 => warn!(status, duration_ms, path = %path, "request rejected"),
                _ => info!(status, duration_ms, "request completed"),
            }

            if elapsed > self.slow_threshold {
                warn!(
                    duration_ms,
                    threshold_ms = self.slow_threshold.as_millis(),
                    "slow request"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn echo_request_id(depot: &mut Depot) -> String {
        depot
            .get::<String>(REQUEST_ID_DEPOT_KEY)
            .cloned()
            .unwrap_or_default()
    }

    fn service() -> Service {
        Service::new(
            Router::new()
                .hoop(RequestLogging::new(Duration::from_secs(1)))
                .push(Router::with_path("echo").get(echo_request_id)),
        )
    }

    #[tokio::test]
    async fn incoming_request_id_is_kept() -> TestResult {
        let mut res = TestClient::get("http://example.com/echo")
            .add_header(request_ids::REQUEST_ID_HEADER, "abc-123", true)
            .send(&service())
            .await;

        let header = res
            .headers()
            .get(request_ids::REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        assert_eq!(header.as_deref(), Some("abc-123"));
        assert_eq!(res.take_string().await?, "abc-123");

        Ok(())
    }

    #[tokio::test]
    async fn missing_request_id_is_generated() -> TestResult {
        let mut res = TestClient::get("http://example.com/echo")
            .send(&service())
            .await;

        let body = res.take_string().await?;
        let header = res
            .headers()
            .get(request_ids::REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok());

        assert_eq!(body.len(), 36);
        assert_eq!(header, Some(body.as_str()));

        Ok(())
    }
}
