use axum::http::{HeaderMap, Uri, header};

pub const X_FORWARDED_HOST: &str = "x-forwarded-host";
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Normalized hostname of the request.
///
/// Source priority: `x-forwarded-host`, `host`, then the URI authority; empty
/// values are skipped. The result goes through [`normalize_host`].
pub fn request_hostname(headers: &HeaderMap, uri: &Uri) -> String {
    let header_value = |name| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
    };

    let raw = header_value(X_FORWARDED_HOST)
        .or_else(|| header_value(header::HOST.as_str()))
        .or_else(|| uri.host())
        .unwrap_or_default();

    normalize_host(raw)
}

/// First entry of a comma list, trimmed, port stripped, lowercased.
///
/// The tenant domain cookie is written and compared with this exact function;
/// any divergence between the two sides breaks the cache isolation between
/// tenants.
pub fn normalize_host(raw: &str) -> String {
    let first = raw.split(',').next().unwrap_or_default().trim();

    let host = match first.strip_prefix('[') {
        // Bracketed IPv6 literal: keep the brackets, drop only a trailing port.
        Some(rest) => match rest.find(']') {
            Some(end) => &first[..end + 2],
            None => first,
        },
        None => first.split(':').next().unwrap_or_default(),
    };

    host.to_ascii_lowercase()
}

/// Whether the client reached us over HTTPS, directly or through a proxy.
pub fn is_https(headers: &HeaderMap, uri: &Uri) -> bool {
    let direct = uri
        .scheme_str()
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https"));

    direct
        || headers
            .get(X_FORWARDED_PROTO)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("https"))
}
