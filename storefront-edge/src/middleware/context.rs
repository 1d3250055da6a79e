//! Access to the edge resolution from handlers.

use crate::models::Resolution;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use service_core::error::AppError;

/// Extractor for the [`Resolution`] stored by the edge middleware.
///
/// ```ignore
/// async fn handler(resolution: Resolution) -> impl IntoResponse {
///     // resolution.role(), resolution.valid_tenant()
/// }
/// ```
///
/// Handlers that also serve out-of-scope paths should take
/// `Option<Resolution>` instead.
#[async_trait]
impl<S> FromRequestParts<S> for Resolution
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Resolution>()
            .cloned()
            .ok_or_else(|| {
                AppError::InternalError(anyhow::anyhow!(
                    "Resolution not found; is the edge middleware installed?"
                ))
            })
    }
}
