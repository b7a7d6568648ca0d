//! Middleware and extractors for authentication and authorization.
//!
//! # Modules
//!
//! - [`auth`]: the `AuthUser` extractor, the edge where role claims are parsed
//! - [`permission`]: permission enforcement (extractors, layer, direct check)
//!
//! # Authorization Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` extractor validates the JWT and extracts claims
//! 3. The role claim is parsed and checked against the permission registry
//! 4. Handler executes only if the role holds the required permission
//!
//! # Example
//!
//! ```ignore
//! use campus::middleware::permission::{RequireCampusDelete, authorize};
//!
//! async fn delete_room(
//!     RequireCampusDelete(auth_user): RequireCampusDelete,
//!     Path(id): Path<Uuid>,
//! ) -> impl IntoResponse {
//!     // Only executes if the caller's role holds "campus:delete"
//! }
//! ```

pub mod auth;
pub mod permission;
