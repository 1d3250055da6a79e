pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use config::Settings;
use middleware::{route_guard::RouteGuard, scope::EdgeScope};
use services::{RendererClient, TenantResolver};
use std::sync::Arc;

/// Shared application state. Built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<TenantResolver>,
    pub guard: Arc<RouteGuard>,
    pub scope: Arc<EdgeScope>,
    pub renderer: Arc<RendererClient>,
}

impl AppState {
    pub fn new(
        resolver: Arc<TenantResolver>,
        guard: Arc<RouteGuard>,
        scope: Arc<EdgeScope>,
        renderer: Arc<RendererClient>,
    ) -> Self {
        Self {
            resolver,
            guard,
            scope,
            renderer,
        }
    }

    /// Build every collaborator from the process settings.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self::new(
            Arc::new(TenantResolver::new(&settings.tenancy)?),
            Arc::new(RouteGuard::new(&settings.routes)),
            Arc::new(EdgeScope::new(&settings.routes)),
            Arc::new(RendererClient::new(&settings.renderer)?),
        ))
    }
}
