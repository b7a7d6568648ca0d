//! # Campus Config
//!
//! Configuration types for the Campus API, loaded from environment variables:
//!
//! - [`jwt`]: access token signing and expiry
//! - [`authz`]: authorization policy and the optional externalized permission table
//!
//! # Example
//!
//! ```ignore
//! use campus_config::{AuthzConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let authz_config = AuthzConfig::from_env();
//! let registry = authz_config.build_registry()?;
//! ```

pub mod authz;
pub mod jwt;

// Re-export commonly used types at crate root
pub use authz::{AuthzConfig, UnknownRolePolicy};
pub use jwt::JwtConfig;
