//! # Campus CLI
//!
//! Inspection and audit tooling for the Campus permission matrix.
//!
//! This library crate provides the report builders used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use campus_cli::report;
//! use campus_core::PermissionRegistry;
//!
//! let registry = PermissionRegistry::builtin();
//! print!("{}", report::audit(&registry));
//! ```

pub mod report;
