use crate::models::Resolution;
use crate::AppState;
use axum::{
    body::to_bytes,
    extract::{Request, State},
    response::Response,
};
use service_core::error::AppError;

/// Fallback handler: proxy the request to the rendering upstream.
///
/// In-scope requests arrive with a [`Resolution`] and have it forwarded as
/// `x-mw-*` headers; excluded paths (`/api`, `/_next`, ...) are forwarded
/// without identity.
pub async fn forward_to_renderer(
    State(state): State<AppState>,
    resolution: Option<Resolution>,
    request: Request,
) -> Result<Response, AppError> {
    let (parts, body) = request.into_parts();

    let body = to_bytes(body, state.renderer.max_body_bytes())
        .await
        .map_err(|e| AppError::PayloadTooLarge(e.to_string()))?;

    state
        .renderer
        .forward(
            parts.method,
            &parts.uri,
            &parts.headers,
            body,
            resolution.as_ref(),
        )
        .await
}
