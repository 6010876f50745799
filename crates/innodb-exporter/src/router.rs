//! Axum router wiring.
//!
//! The telemetry path is configurable; every other path gets the landing page.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let telemetry_path = state.cfg().telemetry_path.clone();
    Router::new()
        .route(&telemetry_path, get(ops::metrics))
        .route("/", get(ops::landing))
        .fallback(ops::landing)
        .with_state(state)
}
