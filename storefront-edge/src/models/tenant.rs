use serde_json::{Map, Number, Value};
use std::fmt;

pub const DEFAULT_TEMPLATE_KEY: &str = "default";

/// Which UI domain a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Operator administration on the admin domain.
    Central,
    /// Customer-facing storefront on a tenant domain.
    Tenant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Central => "central",
            Role::Tenant => "tenant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tenant resolved for a storefront request.
///
/// An invalid identity is an expected outcome (unknown host, backend down):
/// rendering falls back to the default template and generic branding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantIdentity {
    is_valid: bool,
    template_key: String,
    tenant_id: String,
    tenant_name: String,
}

impl TenantIdentity {
    /// Identity used when the host could not be resolved.
    pub fn unresolved() -> Self {
        Self {
            is_valid: false,
            template_key: DEFAULT_TEMPLATE_KEY.to_string(),
            tenant_id: String::new(),
            tenant_name: String::new(),
        }
    }

    /// Rebuild a previously resolved identity from the cookie cache.
    pub fn from_cache(tenant_id: &str, tenant_name: Option<&str>, template_key: Option<&str>) -> Self {
        Self {
            is_valid: true,
            template_key: template_key
                .filter(|key| !key.is_empty())
                .unwrap_or(DEFAULT_TEMPLATE_KEY)
                .to_string(),
            tenant_id: tenant_id.to_string(),
            tenant_name: tenant_name.unwrap_or_default().to_string(),
        }
    }

    /// Derive an identity from a lookup response body.
    ///
    /// Field precedence: `tenant_id` then `id`, `tenant_name` then `name`. A
    /// null or missing field falls through to the next candidate.
    pub fn from_lookup(body: &Map<String, Value>) -> Self {
        let template_key = scalar_text(body.get("template_key"))
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| DEFAULT_TEMPLATE_KEY.to_string());
        let tenant_id = scalar_text(body.get("tenant_id"))
            .or_else(|| scalar_text(body.get("id")))
            .unwrap_or_default();
        let tenant_name = scalar_text(body.get("tenant_name"))
            .or_else(|| scalar_text(body.get("name")))
            .unwrap_or_default();
        let is_valid =
            !tenant_id.is_empty() || !tenant_name.is_empty() || is_truthy(body.get("domain"));

        Self {
            is_valid,
            template_key,
            tenant_id,
            tenant_name,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn template_key(&self) -> &str {
        &self.template_key
    }

    /// Tenant id, or `None` when the backend supplied none.
    pub fn tenant_id(&self) -> Option<&str> {
        Some(self.tenant_id.as_str()).filter(|id| !id.is_empty())
    }

    /// Display name, or `None` when the backend supplied none.
    pub fn tenant_name(&self) -> Option<&str> {
        Some(self.tenant_name.as_str()).filter(|name| !name.is_empty())
    }
}

/// Outcome of resolving one request: the normalized host, its role and, for
/// storefront requests, the tenant identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    hostname: String,
    role: Role,
    tenant: Option<TenantIdentity>,
}

impl Resolution {
    pub fn central(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            role: Role::Central,
            tenant: None,
        }
    }

    pub fn tenant(hostname: impl Into<String>, identity: TenantIdentity) -> Self {
        Self {
            hostname: hostname.into(),
            role: Role::Tenant,
            tenant: Some(identity),
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// `Some` exactly when the role is [`Role::Tenant`].
    pub fn tenant_data(&self) -> Option<&TenantIdentity> {
        self.tenant.as_ref()
    }

    /// The tenant identity, only when it resolved to a known tenant.
    pub fn valid_tenant(&self) -> Option<&TenantIdentity> {
        self.tenant.as_ref().filter(|tenant| tenant.is_valid())
    }
}

// Strings as-is, numbers and booleans as text; null, arrays and objects are absent.
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

// Integral floats print without a fraction, so `1.0` and `1` give the same id.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{:.0}", f)
            }
        }
        _ => n.to_string(),
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lookup(body: Value) -> TenantIdentity {
        TenantIdentity::from_lookup(body.as_object().unwrap())
    }

    #[test]
    fn derives_identity_from_short_field_names() {
        let identity = lookup(json!({
            "id": "t1",
            "name": "Tenant 1",
            "template_key": "custom",
            "domain": "store.test"
        }));

        assert!(identity.is_valid());
        assert_eq!(identity.tenant_id(), Some("t1"));
        assert_eq!(identity.tenant_name(), Some("Tenant 1"));
        assert_eq!(identity.template_key(), "custom");
    }

    #[test]
    fn prefers_prefixed_field_names() {
        let identity = lookup(json!({
            "tenant_id": "tenant-a",
            "id": "row-9",
            "tenant_name": "Shop A",
            "name": "ignored"
        }));

        assert_eq!(identity.tenant_id(), Some("tenant-a"));
        assert_eq!(identity.tenant_name(), Some("Shop A"));
    }

    #[test]
    fn null_prefixed_field_falls_through() {
        let identity = lookup(json!({ "tenant_id": null, "id": 42 }));

        assert_eq!(identity.tenant_id(), Some("42"));
        assert!(identity.is_valid());
    }

    #[test]
    fn integral_float_ids_drop_the_fraction() {
        assert_eq!(lookup(json!({ "id": 1.0 })).tenant_id(), Some("1"));
        assert_eq!(lookup(json!({ "id": -0.0 })).tenant_id(), Some("0"));
        assert_eq!(lookup(json!({ "id": 2.5 })).tenant_id(), Some("2.5"));
        assert_eq!(lookup(json!({ "name": 7 })).tenant_name(), Some("7"));
    }

    #[test]
    fn empty_template_key_uses_default() {
        let identity = lookup(json!({ "id": "t1", "template_key": "" }));
        assert_eq!(identity.template_key(), DEFAULT_TEMPLATE_KEY);
    }

    #[test]
    fn domain_alone_marks_identity_valid() {
        let identity = lookup(json!({ "domain": "store.test" }));

        assert!(identity.is_valid());
        assert_eq!(identity.tenant_id(), None);
        assert_eq!(identity.tenant_name(), None);
    }

    #[test]
    fn empty_object_is_invalid() {
        let identity = lookup(json!({}));

        assert!(!identity.is_valid());
        assert_eq!(identity.template_key(), DEFAULT_TEMPLATE_KEY);
    }

    #[test]
    fn error_body_without_identity_is_invalid() {
        let identity = lookup(json!({ "status": 404, "message": "Tenant not found", "domain": "" }));
        assert!(!identity.is_valid());
    }

    #[test]
    fn cached_identity_defaults_missing_fields() {
        let identity = TenantIdentity::from_cache("t1", None, None);

        assert!(identity.is_valid());
        assert_eq!(identity.template_key(), DEFAULT_TEMPLATE_KEY);
        assert_eq!(identity.tenant_name(), None);
    }

    #[test]
    fn central_resolution_carries_no_tenant() {
        let resolution = Resolution::central("kizuna.test");

        assert_eq!(resolution.role(), Role::Central);
        assert!(resolution.tenant_data().is_none());
        assert!(resolution.valid_tenant().is_none());
    }

    #[test]
    fn role_wire_names() {
        assert_eq!(Role::Central.to_string(), "central");
        assert_eq!(Role::Tenant.as_str(), "tenant");
    }
}
