//! HTTP surface for the tagscript preview gateway.
//!
//! Router construction lives here so integration tests can drive the app
//! with `tower::ServiceExt` without binding a socket.

pub mod handlers;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tagbridge_core::{ExecutionGateway, UsageCounter};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Shared per-process state: the reentrant gateway and the counter store.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ExecutionGateway>,
    pub counter: Arc<UsageCounter>,
    pub counter_key: String,
}

/// Builds the router. An empty origin list allows any origin; the preview
/// client is a plain web page, so CORS stays permissive by default.
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok()),
        )
    };
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/", get(handlers::status))
        .route("/v1/process/:script", get(handlers::v1_process))
        .route(
            "/v2/process/",
            get(handlers::v2_process_get).post(handlers::v2_process_post),
        )
        .with_state(state)
        .layer(cors)
}
