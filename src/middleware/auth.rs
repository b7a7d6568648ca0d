use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use campus_auth::{Claims, verify_token};
use campus_core::{AppError, Permission, PermissionError, PermissionRegistry, Role};

use crate::state::AppState;

/// Extractor that validates the JWT and provides the authenticated user's claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Parse the role claim. Fails for roles this build does not know.
    pub fn role(&self) -> Result<Role, PermissionError> {
        self.0.parse_role()
    }

    /// Check a permission against the registry. Unknown roles hold nothing.
    pub fn has_permission(&self, registry: &PermissionRegistry, permission: Permission) -> bool {
        self.role()
            .map(|role| registry.has_permission(role, permission))
            .unwrap_or(false)
    }

    /// Check if the user has any of the specified permissions
    pub fn has_any_permission(
        &self,
        registry: &PermissionRegistry,
        permissions: &[Permission],
    ) -> bool {
        permissions
            .iter()
            .any(|p| self.has_permission(registry, *p))
    }

    /// Check if the user has all of the specified permissions
    pub fn has_all_permissions(
        &self,
        registry: &PermissionRegistry,
        permissions: &[Permission],
    ) -> bool {
        self.role().is_ok()
            && permissions
                .iter()
                .all(|p| self.has_permission(registry, *p))
    }

    /// Get the user ID as UUID
    pub fn user_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }

    /// Get the user's email
    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}
