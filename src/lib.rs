//! # Campus API
//!
//! Authorization edge of the campus administration API: buildings and rooms,
//! curriculum, and the gradebook are all guarded by a static role-permission
//! matrix.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── campus-core/           # Permission, Role, assignment table, registry, AppError
//! ├── campus-config/         # JwtConfig, AuthzConfig
//! ├── campus-auth/           # Access token claims and JWT helpers
//! ├── campus-observability/  # Logging bootstrap and authorization counters
//! └── campus-cli/            # Inspect, check, audit and export the matrix
//! src/
//! ├── middleware/            # AuthUser extractor and permission enforcement
//! └── state.rs               # Shared application state
//! ```
//!
//! ## Roles
//!
//! | Role | Identifier | Grants |
//! |------|------------|--------|
//! | Super Admin | `super-admin` | Every permission, including ones added later |
//! | Admin | `admin` | Users, settings, campus, class groups, gradebook |
//! | Program Coordinator | `program_coordinator` | Class groups and gradebook management |
//! | Teacher | `teacher` | Gradebook view and grading activities |
//! | Student | `student` | Own profile and class group view |
//! | Parent | `parent` | Profile read only |
//!
//! ## Environment Variables
//!
//! ```bash
//! JWT_SECRET=your-secure-secret-key
//! JWT_ACCESS_EXPIRY=3600
//! APP_ENV=production                          # unknown roles are denied instead of failing
//! AUTHZ_UNKNOWN_ROLE_POLICY=deny              # explicit override: fail | deny
//! PERMISSION_TABLE_PATH=/etc/campus/permissions.json
//! LOG_LEVEL=info
//! OBSERVABILITY_ENABLED=true
//! ```
//!
//! ## Modules
//!
//! - [`middleware`]: Authentication and authorization extractors
//! - [`state`]: Shared application state

pub mod middleware;
pub mod state;

pub use campus_core::{AppError, Permission, PermissionRegistry, Role};
pub use state::{AppState, build_app_state, init_app_state};
