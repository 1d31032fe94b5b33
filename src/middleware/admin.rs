use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use crate::error::AppError;

/// Shared secret guarding the catalog-mutating endpoints.
#[derive(Clone)]
pub struct AdminSecret(Arc<str>);

impl AdminSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminSecret(..)")
    }
}

/// The raw `Authorization` header must equal the configured secret.
pub fn check_admin_secret(header: Option<&str>, secret: &AdminSecret) -> Result<(), AppError> {
    match header {
        Some(value) if !value.is_empty() && value == secret.as_str() => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

/// Proof that the request passed the admin gate.
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth;

impl<S> FromRequestParts<S> for AdminAuth
where
    AdminSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let secret = AdminSecret::from_ref(state);
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        if let Err(err) = check_admin_secret(header, &secret) {
            tracing::warn!(
                method = %parts.method,
                uri = %parts.uri,
                "admin request rejected"
            );
            return Err(err);
        }
        Ok(AdminAuth)
    }
}
