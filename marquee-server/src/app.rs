use axum::{
    Router,
    body::Body,
    http::{Method, Request},
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info_span;

use crate::{AppState, openapi, routes};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn create_app(state: AppState) -> Router {
    let versioned_api = routes::create_api_router(state.clone());
    let docs = openapi::docs_router(&state.config().server, &state.config().project_name);

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    // Request ids are supplied by the proxy in front of us.
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-");
        info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    Router::new()
        .route("/ping", get(ping_handler))
        .merge(docs)
        .merge(versioned_api)
        .layer(cors_layer)
        .layer(trace_layer)
        .with_state(state)
}

async fn ping_handler() -> &'static str {
    "pong"
}
