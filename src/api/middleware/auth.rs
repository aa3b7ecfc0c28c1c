//! Static API key guard for mutating requests

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderName, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AuthConfig;

/// Why a protected request was turned away
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthRejection {
    #[error("API key header missing")]
    Missing,

    #[error("API key does not match")]
    Mismatch,

    #[error("no API key configured")]
    NotConfigured,
}

/// Errors building a guard from configuration
#[derive(Debug, Error)]
pub enum GuardConfigError {
    #[error("invalid API key header name '{0}'")]
    HeaderName(String),

    #[error("invalid HTTP method '{0}' in auth.protected_methods")]
    Method(String),
}

/// Checks the API key header on requests whose method is protected.
///
/// Requests with any other method pass through untouched.
#[derive(Debug, Clone)]
pub struct ApiKeyGuard {
    header_name: HeaderName,
    api_key: Option<String>,
    protected_methods: Vec<Method>,
}

impl ApiKeyGuard {
    pub fn new(header_name: HeaderName, api_key: Option<String>, protected_methods: Vec<Method>) -> Self {
        Self {
            header_name,
            api_key,
            protected_methods,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, GuardConfigError> {
        let header_name = HeaderName::from_bytes(config.header_name.as_bytes())
            .map_err(|_| GuardConfigError::HeaderName(config.header_name.clone()))?;

        let protected_methods = config
            .protected_methods
            .iter()
            .map(|m| {
                Method::from_bytes(m.trim().to_uppercase().as_bytes())
                    .map_err(|_| GuardConfigError::Method(m.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let api_key = config.api_key.clone().filter(|key| !key.is_empty());

        if api_key.is_none() {
            warn!("No API key configured; every protected request will be rejected");
        }

        if !protected_methods.contains(&Method::DELETE) {
            warn!("DELETE requests are not protected by the API key");
        }

        Ok(Self::new(header_name, api_key, protected_methods))
    }

    pub fn applies_to(&self, method: &Method) -> bool {
        self.protected_methods.contains(method)
    }

    /// Exact match of the single header value against the configured key
    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), AuthRejection> {
        let expected = self.api_key.as_deref().ok_or(AuthRejection::NotConfigured)?;

        let mut values = headers.get_all(&self.header_name).iter();
        let provided = values.next().ok_or(AuthRejection::Missing)?;

        if values.next().is_some() {
            return Err(AuthRejection::Mismatch);
        }

        match provided.to_str() {
            Ok(value) if value == expected => Ok(()),
            _ => Err(AuthRejection::Mismatch),
        }
    }
}

/// Short-circuits protected requests without a valid key with a plain text 401
pub async fn api_key_middleware(
    State(guard): State<Arc<ApiKeyGuard>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !guard.applies_to(request.method()) {
        return next.run(request).await;
    }

    match guard.authorize(request.headers()) {
        Ok(()) => {
            debug!(method = %request.method(), "API key accepted");
            next.run(request).await
        }
        Err(rejection) => {
            warn!(
                method = %request.method(),
                path = %request.uri().path(),
                reason = %rejection,
                "Rejected request"
            );
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}
