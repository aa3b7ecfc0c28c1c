//! Request/response plumbing shared by the handlers

pub mod error;
pub mod json;
pub mod path;

pub use error::ApiError;
pub use json::Json;
pub use path::Path;
