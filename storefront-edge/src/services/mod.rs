pub mod renderer_client;
pub mod tenant_client;
pub mod tenant_resolver;

pub use renderer_client::RendererClient;
pub use tenant_client::{LookupError, TenantLookupClient};
pub use tenant_resolver::TenantResolver;
