use crate::config::RendererSettings;
use crate::middleware::cookies::{IDENTITY_PREFIX, identity_pairs};
use crate::models::Resolution;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, Uri, header};
use axum::response::Response;
use reqwest::{Client, Url};
use service_core::error::AppError;
use service_core::observability::TracedClientExt;
use std::time::Duration;

/// Headers that describe a single hop and must not be forwarded.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Forwards storefront and admin page requests to the rendering upstream.
pub struct RendererClient {
    client: Client,
    base_url: Url,
    max_body_bytes: usize,
}

impl RendererClient {
    pub fn new(settings: &RendererSettings) -> anyhow::Result<Self> {
        let base_url = Url::parse(&settings.url)
            .map_err(|e| anyhow::anyhow!("Invalid renderer URL '{}': {}", settings.url, e))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build renderer client: {}", e))?;

        Ok(Self {
            client,
            base_url,
            max_body_bytes: settings.max_body_bytes,
        })
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    /// Upstream URL for `uri`: base URL with the request's path and query.
    pub fn upstream_url(&self, uri: &Uri) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(uri.path());
        url.set_query(uri.query());
        url
    }

    pub async fn forward(
        &self,
        method: Method,
        uri: &Uri,
        headers: &HeaderMap,
        body: Bytes,
        resolution: Option<&Resolution>,
    ) -> Result<Response, AppError> {
        let url = self.upstream_url(uri);
        let headers = upstream_headers(headers, resolution);

        let upstream = self
            .client
            .traced_request(method, url.clone())
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to forward request to renderer {}: {}", url, e);
                AppError::BadGateway(format!("renderer unreachable: {}", e))
            })?;

        let status = upstream.status();
        let mut response_headers = upstream.headers().clone();
        strip_hop_by_hop(&mut response_headers);

        let bytes = upstream.bytes().await.map_err(|e| {
            tracing::error!("Failed to read renderer response from {}: {}", url, e);
            AppError::BadGateway(format!("renderer response interrupted: {}", e))
        })?;

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = response_headers;

        Ok(response)
    }
}

/// Request headers sent upstream.
///
/// Client-supplied `x-mw-*` headers are always dropped so only the edge can
/// assert an identity; the resolved one is added back when present.
pub fn upstream_headers(incoming: &HeaderMap, resolution: Option<&Resolution>) -> HeaderMap {
    let mut headers = incoming.clone();
    strip_hop_by_hop(&mut headers);
    headers.remove(header::HOST);
    // reqwest sets the length for the buffered body.
    headers.remove(header::CONTENT_LENGTH);

    let spoofed: Vec<HeaderName> = headers
        .keys()
        .filter(|name| name.as_str().starts_with(IDENTITY_PREFIX))
        .cloned()
        .collect();
    for name in spoofed {
        headers.remove(name);
    }

    if let Some(resolution) = resolution {
        for (name, value) in identity_pairs(resolution) {
            headers.insert(HeaderName::from_static(name), header_value(&value));
        }
    }

    headers
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
}

// Tenant names may be arbitrary UTF-8; percent-encode `%` and anything that
// is not visible ASCII or a space.
fn header_value(value: &str) -> HeaderValue {
    let encoded: String = value
        .bytes()
        .map(|b| {
            if (b.is_ascii_graphic() && b != b'%') || b == b' ' {
                (b as char).to_string()
            } else {
                format!("%{:02X}", b)
            }
        })
        .collect();

    HeaderValue::from_str(&encoded).unwrap_or_else(|_| HeaderValue::from_static(""))
}
