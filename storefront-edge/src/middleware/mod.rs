pub mod context;
pub mod cookies;
pub mod edge;
pub mod route_guard;
pub mod scope;
