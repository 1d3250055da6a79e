use crate::config::RouteSettings;

/// Redirects unauthenticated requests away from the admin areas.
///
/// The decision is made on the path alone: a central-prefixed path reached on
/// a storefront host is still guarded, and vice versa.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    auth_cookie: String,
    central_prefix: String,
    login_path: String,
    tenant_prefix: String,
    storefront_root: String,
}

impl RouteGuard {
    pub fn new(settings: &RouteSettings) -> Self {
        Self {
            auth_cookie: settings.auth_cookie.clone(),
            central_prefix: settings.central_prefix.clone(),
            login_path: settings.login_path.clone(),
            tenant_prefix: settings.tenant_prefix.clone(),
            storefront_root: settings.storefront_root.clone(),
        }
    }

    /// Name of the cookie whose presence counts as authenticated.
    pub fn auth_cookie(&self) -> &str {
        &self.auth_cookie
    }

    /// Redirect target for `path`, or `None` when the request may proceed.
    pub fn check_route(&self, path: &str, has_auth_token: bool) -> Option<&str> {
        if has_auth_token {
            return None;
        }

        if path.starts_with(self.central_prefix.as_str()) {
            tracing::info!(path, "Unauthorized access to central area, redirecting to login");
            return Some(self.login_path.as_str());
        }

        if path.starts_with(self.tenant_prefix.as_str()) {
            tracing::info!(path, "Unauthorized access to tenant area, redirecting to storefront");
            return Some(self.storefront_root.as_str());
        }

        None
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(&RouteSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn central_requires_token() {
        let guard = RouteGuard::default();

        assert_eq!(guard.check_route("/central/dashboard", false), Some("/login"));
        assert_eq!(guard.check_route("/central/dashboard", true), None);
    }

    #[test]
    fn tenant_requires_token() {
        let guard = RouteGuard::default();

        assert_eq!(guard.check_route("/tenant/orders", false), Some("/"));
        assert_eq!(guard.check_route("/tenant/orders", true), None);
    }

    #[test]
    fn unprotected_paths_pass() {
        let guard = RouteGuard::default();

        assert_eq!(guard.check_route("/public/page", false), None);
        assert_eq!(guard.check_route("/", false), None);
        assert_eq!(guard.check_route("/login", false), None);
    }

    #[test]
    fn bare_prefix_is_guarded() {
        let guard = RouteGuard::default();

        assert_eq!(guard.check_route("/central", false), Some("/login"));
        assert_eq!(guard.check_route("/tenant", false), Some("/"));
    }

    #[test]
    fn honours_configured_prefixes() {
        let guard = RouteGuard::new(&RouteSettings {
            central_prefix: "/admin".to_string(),
            login_path: "/signin".to_string(),
            ..RouteSettings::default()
        });

        assert_eq!(guard.check_route("/admin/users", false), Some("/signin"));
        assert_eq!(guard.check_route("/central/dashboard", false), None);
    }
}
