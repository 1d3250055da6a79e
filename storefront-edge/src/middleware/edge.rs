//! Per-request edge controller: resolve the tenant, guard admin paths, and
//! hand the resolved identity to rendering through cookies.

use crate::middleware::cookies::resolution_cookies;
use crate::utils::host::is_https;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

/// Edge controller middleware.
///
/// Out-of-scope paths pass straight through. Otherwise: resolve, then guard;
/// a guard redirect is returned as is, without cookies. A passing request
/// carries its [`Resolution`](crate::models::Resolution) in the extensions
/// and its response gets the identity cookies.
pub async fn edge_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if state.scope.is_excluded(request.uri().path()) {
        return next.run(request).await;
    }

    let resolution = state
        .resolver
        .resolve(request.headers(), request.uri())
        .await;

    let has_auth_token = CookieJar::from_headers(request.headers())
        .get(state.guard.auth_cookie())
        .is_some();

    if let Some(target) = state.guard.check_route(request.uri().path(), has_auth_token) {
        return Redirect::temporary(target).into_response();
    }

    let cookies = resolution_cookies(&resolution, is_https(request.headers(), request.uri()));
    request.extensions_mut().insert(resolution);

    let response = next.run(request).await;

    (cookies, response).into_response()
}
