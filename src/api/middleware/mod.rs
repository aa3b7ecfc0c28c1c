//! API middleware components

pub mod auth;
pub mod logging;

pub use auth::{api_key_middleware, ApiKeyGuard};
pub use logging::logging_middleware;
