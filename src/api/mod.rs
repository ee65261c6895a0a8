//! HTTP API: ping, band and song endpoints, OpenAPI document.

pub mod bands;
pub mod handlers;
pub mod routes;
pub mod songs;

pub use handlers::AppState;
pub use routes::{create_router, ApiDoc};
