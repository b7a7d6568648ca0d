//! # Campus Core
//!
//! Authorization core and shared error types for the Campus API.
//!
//! - [`permissions`]: the closed set of permission identifiers
//! - [`roles`]: the closed set of built-in roles
//! - [`table`]: the role → permissions assignment table, built-in or loaded from JSON
//! - [`registry`]: the query surface consulted by request handlers and tooling
//! - [`errors`]: application error type with HTTP response conversion
//!
//! # Example
//!
//! ```
//! use campus_core::{Permission, PermissionRegistry, Role};
//!
//! let registry = PermissionRegistry::builtin();
//! assert!(registry.has_permission(Role::Admin, Permission::CampusDelete));
//! assert!(!registry.has_permission(Role::Student, Permission::CampusDelete));
//! ```

pub mod errors;
pub mod permissions;
pub mod registry;
pub mod roles;
pub mod table;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use permissions::{Permission, PermissionError};
pub use registry::PermissionRegistry;
pub use roles::Role;
pub use table::{RoleAssignmentTable, RoleGrant, TableError};
