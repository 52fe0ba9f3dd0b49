//! HTTP server: state, middleware, and the route handlers that translate
//! JSON in/out over the domain stores and the scheduling core.

pub mod app;
pub mod middleware;
pub mod routes;

pub use app::{build_app, AppState};
