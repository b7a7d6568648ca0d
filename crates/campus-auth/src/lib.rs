//! # Campus Auth
//!
//! Access token claims and JWT utilities for the Campus API.
//!
//! - [`claims`]: the access token claim set, carrying the user's role identifier
//! - [`jwt`]: token creation and verification
//!
//! The role claim stays a raw string until the request edge parses it, so a
//! token naming an unknown role is still verifiable and is rejected by
//! authorization rather than by authentication.

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, encode_claims, verify_token};
