pub mod tenant;

pub use tenant::{Resolution, Role, TenantIdentity};
