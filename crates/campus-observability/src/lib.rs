//! Campus Observability Module
//!
//! - Console logging bootstrap over `tracing-subscriber`
//! - Authorization decision counters via the `metrics` facade
//!
//! Counters are recorded only when `OBSERVABILITY_ENABLED` is not `false`/`0`
//! and reach whichever recorder the host process installs.
//!
//! # Examples
//!
//! ```no_run
//! use campus_observability::{CheckOutcome, init_console_logging, track_permission_check};
//!
//! init_console_logging("info");
//! track_permission_check("teacher", "gradebook:view", CheckOutcome::Granted);
//! ```

pub mod logging;
pub mod metrics;

pub use self::logging::init_console_logging;
pub use self::metrics::{
    CheckOutcome, is_observability_enabled, track_permission_check, track_table_rejected,
};
