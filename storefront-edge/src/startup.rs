use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use tower_http::trace::TraceLayer;

use crate::handlers::{app::health_check, metrics::metrics, render::forward_to_renderer};
use crate::middleware::edge::edge_middleware;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    // Everything the renderer serves goes through the edge controller; ops
    // endpoints are answered locally and never trigger a tenant lookup.
    let storefront = Router::new()
        .fallback(forward_to_renderer)
        .layer(from_fn_with_state(state.clone(), edge_middleware));

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .merge(storefront)
        .layer(from_fn(metrics_middleware))
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
