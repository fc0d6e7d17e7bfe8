use async_trait::async_trait;
use axum::http::{header, HeaderMap};

use crate::auth::models::Role;
use crate::error::AppError;

/// Maps a bearer token to the caller's role.
///
/// Token verification belongs to the identity provider; this trait is
/// the seam it plugs in behind. The static implementation below covers
/// single-instance deployments and tests.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Role, AppError>;
}

/// Verifier backed by shared secrets from configuration.
pub struct StaticTokenVerifier {
    admin_token: String,
    subadmin_token: String,
}

impl StaticTokenVerifier {
    pub fn new(admin_token: String, subadmin_token: String) -> Self {
        Self {
            admin_token,
            subadmin_token,
        }
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Role, AppError> {
        if token == self.admin_token {
            Ok(Role::Admin)
        } else if token == self.subadmin_token {
            Ok(Role::Subadmin)
        } else {
            Err(AppError::Auth("invalid bearer token".into()))
        }
    }
}

/// Resolve the caller's role from the Authorization header and check it
/// against the role a route requires.
pub async fn authorize(
    verifier: &dyn TokenVerifier,
    headers: &HeaderMap,
    required: Role,
) -> Result<Role, AppError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Auth("missing Authorization header".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Auth("expected a bearer token".into()))?;

    let role = verifier.verify(token).await?;
    if !role.has_access(required) {
        return Err(AppError::Forbidden(format!("requires {} access", required)));
    }
    Ok(role)
}
