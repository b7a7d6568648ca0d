use metrics::counter;
use std::sync::OnceLock;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true) // Enabled by default
    })
}

/// Result of a single authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Granted,
    Denied,
    UnknownRole,
}

impl CheckOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckOutcome::Granted => "granted",
            CheckOutcome::Denied => "denied",
            CheckOutcome::UnknownRole => "unknown_role",
        }
    }
}

/// Count an authorization decision.
///
/// `role` is a fixed label (a known role identifier or `"unknown"`), never a raw claim.
pub fn track_permission_check(
    role: &'static str,
    permission: &'static str,
    outcome: CheckOutcome,
) {
    if !is_observability_enabled() {
        return;
    }
    counter!(
        "authz_checks_total",
        "role" => role,
        "permission" => permission,
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

/// Count a table that failed its startup consistency check.
pub fn track_table_rejected(reason: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("authz_table_rejected_total", "reason" => reason.to_string()).increment(1);
}
