use crate::config::TenancySettings;
use crate::middleware::cookies::{
    TENANT_DOMAIN_COOKIE, TENANT_ID_COOKIE, TENANT_NAME_COOKIE, TENANT_TEMPLATE_COOKIE,
};
use crate::models::{Resolution, TenantIdentity};
use crate::services::tenant_client::TenantLookupClient;
use crate::utils::host::{normalize_host, request_hostname};
use axum::http::{HeaderMap, Uri};
use axum_extra::extract::cookie::CookieJar;
use metrics::counter;
use std::collections::HashSet;

/// Maps a request to its role and, for storefront hosts, its tenant.
///
/// Resolution never fails: lookup problems degrade to
/// [`TenantIdentity::unresolved`].
pub struct TenantResolver {
    admin_domains: HashSet<String>,
    lookup: TenantLookupClient,
}

impl TenantResolver {
    pub fn new(settings: &TenancySettings) -> anyhow::Result<Self> {
        let admin_domains = [normalize_host(&settings.admin_domain)]
            .into_iter()
            .filter(|domain| !domain.is_empty())
            .collect();

        Ok(Self {
            admin_domains,
            lookup: TenantLookupClient::new(settings)?,
        })
    }

    pub fn is_admin_domain(&self, hostname: &str) -> bool {
        self.admin_domains.contains(hostname)
    }

    pub async fn resolve(&self, headers: &HeaderMap, uri: &Uri) -> Resolution {
        let hostname = request_hostname(headers, uri);

        if self.is_admin_domain(&hostname) {
            tracing::debug!(hostname = %hostname, "Resolved central host");
            counter!("tenant_resolution_total", "source" => "central").increment(1);
            return Resolution::central(hostname);
        }

        let jar = CookieJar::from_headers(headers);
        if let Some(identity) = cached_identity(&jar, &hostname) {
            tracing::debug!(
                hostname = %hostname,
                tenant_id = ?identity.tenant_id(),
                "Resolved tenant from cookie cache"
            );
            counter!("tenant_resolution_total", "source" => "cookie").increment(1);
            return Resolution::tenant(hostname, identity);
        }

        let identity = match self.lookup.lookup(&hostname).await {
            Ok(serde_json::Value::Object(body)) => {
                counter!("tenant_resolution_total", "source" => "backend").increment(1);
                TenantIdentity::from_lookup(&body)
            }
            Ok(other) => {
                tracing::warn!(
                    hostname = %hostname,
                    body_type = json_type(&other),
                    "Tenant lookup returned no identity object"
                );
                counter!("tenant_resolution_total", "source" => "fallback").increment(1);
                TenantIdentity::unresolved()
            }
            Err(e) => {
                tracing::warn!(hostname = %hostname, error = %e, "Tenant resolution failed");
                counter!("tenant_resolution_total", "source" => "fallback").increment(1);
                TenantIdentity::unresolved()
            }
        };

        tracing::debug!(
            hostname = %hostname,
            valid = identity.is_valid(),
            tenant_id = ?identity.tenant_id(),
            template = identity.template_key(),
            "Resolved tenant from backend"
        );

        Resolution::tenant(hostname, identity)
    }
}

/// Identity carried by the cookie cache, if it belongs to `hostname`.
///
/// Requires a non-empty tenant id cookie and a domain cookie equal to the
/// current hostname; a missing or foreign domain cookie is a miss.
fn cached_identity(jar: &CookieJar, hostname: &str) -> Option<TenantIdentity> {
    let tenant_id = jar.get(TENANT_ID_COOKIE).map(|c| c.value()).filter(|v| !v.is_empty())?;
    let cached_domain = jar.get(TENANT_DOMAIN_COOKIE).map(|c| c.value())?;

    if cached_domain != hostname {
        tracing::debug!(hostname, cached_domain, "Ignoring tenant cookies set for another domain");
        return None;
    }

    Some(TenantIdentity::from_cache(
        tenant_id,
        jar.get(TENANT_NAME_COOKIE).map(|c| c.value()),
        jar.get(TENANT_TEMPLATE_COOKIE).map(|c| c.value()),
    ))
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
