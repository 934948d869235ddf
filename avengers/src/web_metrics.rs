use std::{future::ready, net::SocketAddr, time::Instant};

use axum::{
    Router, extract::MatchedPath, extract::Request, middleware::Next, response::IntoResponse,
    routing::get,
};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use tracing::error;

const REQUEST_DURATION: &str = "avengers_http_requests_duration_seconds";

pub(crate) async fn track_metrics(req: Request, next: Next) -> impl IntoResponse {
    let start = Instant::now();
    let path = if let Some(matched_path) = req.extensions().get::<MatchedPath>() {
        matched_path.as_str().to_owned()
    } else {
        req.uri().path().to_owned()
    };
    let method = req.method().clone();
    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    let labels = [
        ("method", method.to_string()),
        ("path", path),
        ("status", status),
    ];

    metrics::counter!("avengers_http_requests_total", &labels).increment(1);
    metrics::histogram!(REQUEST_DURATION, &labels).record(latency);

    response
}

/// Counts handled invokes by activity name and whether they succeeded.
pub(crate) fn record_invoke(name: &str, succeeded: bool) {
    let outcome = if succeeded { "ok" } else { "error" };
    metrics::counter!(
        "avengers_invokes_total",
        "name" => name.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

fn metrics_app(recorder_handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || ready(recorder_handle.render())))
}

fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    const EXPONENTIAL_SECONDS: &[f64] = &[
        0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_DURATION.to_string()),
            EXPONENTIAL_SECONDS,
        )?
        .install_recorder()
}

/// Serves prometheus metrics on its own port, away from the bot endpoint.
pub(crate) async fn start_metrics_server(addr: SocketAddr) {
    let recorder_handle = match setup_metrics_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            error!("Unable to install metrics recorder {e}");
            return;
        }
    };
    tracing::debug!("metrics listening on {}", addr);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Unable to bind metrics server to {addr}: {e}");
            return;
        }
    };
    if let Err(e) = axum::serve(listener, metrics_app(recorder_handle)).await {
        error!("Metrics server stopped {e}");
    }
}
