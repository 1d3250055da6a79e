#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request},
    response::Response,
    Router,
};
use axum_extra::extract::cookie::Cookie;
use serde_json::Value;
use std::collections::HashMap;
use storefront_edge::config::Settings;
use storefront_edge::startup::build_router;
use storefront_edge::AppState;
use wiremock::{
    matchers::{any, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const ADMIN_DOMAIN: &str = "kizuna.test";
pub const LOOKUP_PATH: &str = "/central/tenant";

/// Backend lookup and renderer doubles plus settings pointing at them.
pub struct TestEdge {
    pub backend: MockServer,
    pub renderer: MockServer,
    pub settings: Settings,
}

impl TestEdge {
    pub async fn spawn() -> Self {
        let backend = MockServer::start().await;
        let renderer = MockServer::start().await;

        let mut settings = Settings::default();
        settings.tenancy.admin_domain = ADMIN_DOMAIN.to_string();
        settings.tenancy.lookup_url = format!("{}{}", backend.uri(), LOOKUP_PATH);
        settings.tenancy.lookup_timeout_ms = 500;
        settings.renderer.url = renderer.uri();

        Self {
            backend,
            renderer,
            settings,
        }
    }

    pub fn router(&self) -> Router {
        let state = AppState::from_settings(&self.settings).expect("Failed to build app state");
        build_router(state)
    }

    /// Answer lookups for `domain` with `body`, expecting exactly `times` calls.
    pub async fn mock_lookup(&self, domain: &str, body: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path(LOOKUP_PATH))
            .and(query_param("domain", domain))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(times)
            .mount(&self.backend)
            .await;
    }

    /// Fail the test if the backend sees any request.
    pub async fn forbid_lookups(&self) {
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.backend)
            .await;
    }

    pub async fn mock_renderer(&self) {
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_string("rendered"))
            .mount(&self.renderer)
            .await;
    }
}

pub fn get(host: &str, uri: &str, cookies: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).header(header::HOST, host);
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder.body(Body::empty()).unwrap()
}

/// `Set-Cookie` headers of `response`, decoded and keyed by name.
pub fn response_cookies(response: &Response) -> HashMap<String, Cookie<'static>> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| Cookie::parse_encoded(value.to_str().unwrap().to_string()).unwrap())
        .map(|cookie| (cookie.name().to_string(), cookie))
        .collect()
}

pub fn cookie_value<'a>(cookies: &'a HashMap<String, Cookie<'static>>, name: &str) -> Option<&'a str> {
    cookies.get(name).map(|c| c.value())
}

pub async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
