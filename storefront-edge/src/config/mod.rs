use serde::Deserialize;
use service_core::config::load_settings;
use service_core::error::AppError;

/// Process-wide settings. Read once in `main` and never mutated afterwards.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub tenancy: TenancySettings,
    pub routes: RouteSettings,
    pub renderer: RendererSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TenancySettings {
    /// Hostname of the central administration UI. Requests on any other host
    /// are storefront requests. Overridden by `APP_DOMAIN`.
    pub admin_domain: String,
    /// Backend tenant lookup endpoint; the hostname is sent as `?domain=`.
    /// Overridden by `TENANT_VALIDATION_API_URL`.
    pub lookup_url: String,
    pub lookup_timeout_ms: u64,
    /// Lookup bodies larger than this are treated as a failed lookup.
    pub lookup_max_body_bytes: usize,
}

impl Default for TenancySettings {
    fn default() -> Self {
        Self {
            admin_domain: "kizuna.test".to_string(),
            lookup_url: "http://backend:8080/central/tenant".to_string(),
            lookup_timeout_ms: 3000,
            lookup_max_body_bytes: 64 * 1024,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct RouteSettings {
    pub auth_cookie: String,
    pub central_prefix: String,
    pub login_path: String,
    pub tenant_prefix: String,
    pub storefront_root: String,
    /// Path prefixes (without the leading slash) that bypass the edge entirely.
    pub excluded_prefixes: Vec<String>,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            auth_cookie: "token".to_string(),
            central_prefix: "/central".to_string(),
            login_path: "/login".to_string(),
            tenant_prefix: "/tenant".to_string(),
            storefront_root: "/".to_string(),
            excluded_prefixes: ["api", "_next", "favicon.ico", "health"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct RendererSettings {
    /// Base URL of the page-rendering upstream.
    pub url: String,
    pub timeout_ms: u64,
    pub max_body_bytes: usize,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            url: "http://frontend:3001".to_string(),
            timeout_ms: 30_000,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TelemetrySettings {
    pub log_level: String,
    /// OTLP gRPC collector; span export is disabled when unset.
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            otlp_endpoint: None,
        }
    }
}

pub fn get_configuration() -> Result<Settings, AppError> {
    let base_path = std::env::current_dir()?;

    // Check if we're already in storefront-edge directory or need to navigate to it
    let configuration_directory = if base_path.ends_with("storefront-edge") {
        base_path.join("config")
    } else {
        base_path.join("storefront-edge").join("config")
    };

    load_settings(
        &configuration_directory,
        &[
            ("tenancy.admin_domain", "APP_DOMAIN"),
            ("tenancy.lookup_url", "TENANT_VALIDATION_API_URL"),
        ],
    )
}
