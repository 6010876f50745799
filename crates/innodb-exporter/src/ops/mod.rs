//! HTTP endpoints.
//!
//! - `/`        : landing page (also served for unknown paths)
//! - telemetry  : Prometheus text format, one scrape per request

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::app_state::AppState;

/// Landing page body linking to the telemetry path.
pub fn landing_page(telemetry_path: &str) -> String {
    format!(
        "<html>\n\
         <head><title>MySQL InnoDB Cluster Exporter</title></head>\n\
         <body>\n\
         <h1>MySQL InnoDB Cluster Exporter</h1>\n\
         <p><a href='{telemetry_path}'>Metrics</a></p>\n\
         </body>\n\
         </html>"
    )
}

pub async fn landing(State(state): State<AppState>) -> Html<String> {
    Html(state.landing_page().to_owned())
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let metrics = state.metrics();

    // The scrape blocks on a child process.
    let rendered = tokio::task::spawn_blocking(move || metrics.render()).await;

    match rendered {
        Ok(Ok(body)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            body,
        )
            .into_response(),
        Ok(Err(e)) => {
            tracing::error!(kind = e.kind().as_str(), error = %e, "metrics encoding failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "scrape task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "scrape task failed").into_response()
        }
    }
}
