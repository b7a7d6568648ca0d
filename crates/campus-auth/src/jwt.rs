//! JWT utilities for access tokens.
//!
//! # Example
//!
//! ```ignore
//! use campus_auth::{create_access_token, verify_token};
//! use campus_config::JwtConfig;
//! use campus_core::Role;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "teacher@campus.edu", Role::Teacher, &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use campus_config::JwtConfig;
use campus_core::{AppError, Role};

use crate::claims::Claims;

/// Creates an access token carrying the user's role identifier.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role: role.as_str().to_string(),
        exp,
        iat: now,
    };

    encode_claims(&claims, jwt_config)
}

/// Signs an arbitrary claim set.
///
/// Used where the role claim did not originate from a [`Role`], such as
/// tokens issued before a role was retired.
pub fn encode_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error if the signature is invalid, the token has
/// expired, or the token is malformed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-for-testing-only".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_create_and_verify_access_token() {
        let config = config();
        let user_id = Uuid::new_v4();

        let token = create_access_token(user_id, "teacher@campus.edu", Role::Teacher, &config)
            .unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "teacher@campus.edu");
        assert_eq!(claims.role, "teacher");
        assert_eq!(claims.parse_role(), Ok(Role::Teacher));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let token =
            create_access_token(Uuid::new_v4(), "a@campus.edu", Role::Admin, &config()).unwrap();
        let other = JwtConfig {
            secret: "a-different-secret".to_string(),
            ..config()
        };

        let err = verify_token(&token, &other).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_verify_malformed_token() {
        assert!(verify_token("not.a.token", &config()).is_err());
    }

    #[test]
    fn test_verify_expired_token() {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "old@campus.edu".to_string(),
            role: "teacher".to_string(),
            exp: now - 7200,
            iat: now - 10800,
        };
        let token = encode_claims(&claims, &config()).unwrap();
        assert!(verify_token(&token, &config()).is_err());
    }

    #[test]
    fn test_unknown_role_survives_signing() {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "legacy@campus.edu".to_string(),
            role: "guest".to_string(),
            exp: now + 3600,
            iat: now,
        };
        let token = encode_claims(&claims, &config()).unwrap();
        let verified = verify_token(&token, &config()).unwrap();

        assert_eq!(verified.role, "guest");
        assert!(verified.parse_role().is_err());
    }
}
