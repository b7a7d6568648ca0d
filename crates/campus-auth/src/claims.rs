//! JWT claim structures for access tokens.

use campus_core::{PermissionError, Role};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims for access tokens.
///
/// The role is carried as the raw identifier string. Tokens outlive deploys,
/// so a token may name a role this build does not know; parsing happens at
/// the request edge through [`Claims::parse_role`].
///
/// # Fields
///
/// - `sub`: User ID (subject)
/// - `email`: User's email address
/// - `role`: Role identifier (e.g. `"teacher"`)
/// - `exp`: Token expiration timestamp
/// - `iat`: Token issued-at timestamp
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Role identifier as persisted on the user record
    pub role: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// Parse the role claim into the closed [`Role`] set.
    pub fn parse_role(&self) -> Result<Role, PermissionError> {
        self.role.parse()
    }
}
