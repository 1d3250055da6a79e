//! Names and attributes of the identity cookies the edge hands to rendering.
//!
//! The tenant cookies double as a client-held cache of the last backend
//! lookup; [`TENANT_DOMAIN_COOKIE`] pins that cache to one hostname.

use crate::models::Resolution;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const ROLE_COOKIE: &str = "x-mw-role";
pub const TENANT_ID_COOKIE: &str = "x-mw-tenant-id";
pub const TENANT_NAME_COOKIE: &str = "x-mw-tenant-name";
pub const TENANT_TEMPLATE_COOKIE: &str = "x-mw-tenant-template";
pub const TENANT_DOMAIN_COOKIE: &str = "x-mw-tenant-domain";

/// Prefix shared by every identity cookie and forwarded identity header.
pub const IDENTITY_PREFIX: &str = "x-mw-";

/// Readable by client-side rendering code, so not HTTP-only.
pub fn edge_cookie(name: &'static str, value: impl Into<String>, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value.into()))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(false)
        .secure(secure)
        .build()
}

/// Name/value pairs describing `resolution`, in the order they are written.
///
/// Always the role; for a valid tenant also domain and template, plus id and
/// name when present.
pub fn identity_pairs(resolution: &Resolution) -> Vec<(&'static str, String)> {
    let mut pairs = vec![(ROLE_COOKIE, resolution.role().to_string())];

    if let Some(tenant) = resolution.valid_tenant() {
        pairs.push((TENANT_DOMAIN_COOKIE, resolution.hostname().to_string()));
        pairs.push((TENANT_TEMPLATE_COOKIE, tenant.template_key().to_string()));
        if let Some(id) = tenant.tenant_id() {
            pairs.push((TENANT_ID_COOKIE, id.to_string()));
        }
        if let Some(name) = tenant.tenant_name() {
            pairs.push((TENANT_NAME_COOKIE, name.to_string()));
        }
    }

    pairs
}

/// Response cookies for a pass-through response.
pub fn resolution_cookies(resolution: &Resolution, secure: bool) -> CookieJar {
    identity_pairs(resolution)
        .into_iter()
        .fold(CookieJar::new(), |jar, (name, value)| {
            jar.add(edge_cookie(name, value, secure))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TenantIdentity;
    use serde_json::json;

    #[test]
    fn cookie_attributes() {
        let cookie = edge_cookie(ROLE_COOKIE, "tenant", true);

        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.http_only(), Some(false));
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn central_resolution_sets_only_role() {
        let jar = resolution_cookies(&Resolution::central("kizuna.test"), false);

        assert_eq!(jar.get(ROLE_COOKIE).map(|c| c.value()), Some("central"));
        assert!(jar.get(TENANT_DOMAIN_COOKIE).is_none());
    }

    #[test]
    fn invalid_tenant_sets_only_role() {
        let resolution = Resolution::tenant("unknown.test", TenantIdentity::unresolved());

        assert_eq!(
            identity_pairs(&resolution),
            vec![(ROLE_COOKIE, "tenant".to_string())]
        );
    }

    #[test]
    fn valid_tenant_without_name_skips_name_cookie() {
        let body = json!({ "id": "t1", "domain": "store.test" });
        let identity = TenantIdentity::from_lookup(body.as_object().unwrap());
        let jar = resolution_cookies(&Resolution::tenant("store.test", identity), false);

        assert_eq!(jar.get(TENANT_ID_COOKIE).map(|c| c.value()), Some("t1"));
        assert_eq!(
            jar.get(TENANT_DOMAIN_COOKIE).map(|c| c.value()),
            Some("store.test")
        );
        assert_eq!(
            jar.get(TENANT_TEMPLATE_COOKIE).map(|c| c.value()),
            Some("default")
        );
        assert!(jar.get(TENANT_NAME_COOKIE).is_none());
    }
}
