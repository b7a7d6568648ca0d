use std::sync::Arc;

use campus_config::{AuthzConfig, JwtConfig};
use campus_core::{PermissionRegistry, TableError};
use campus_observability::track_table_rejected;

#[derive(Clone, Debug)]
pub struct AppState {
    pub jwt_config: JwtConfig,
    pub authz_config: AuthzConfig,
    pub registry: Arc<PermissionRegistry>,
}

impl AppState {
    pub fn new(
        jwt_config: JwtConfig,
        authz_config: AuthzConfig,
        registry: PermissionRegistry,
    ) -> Self {
        Self {
            jwt_config,
            authz_config,
            registry: Arc::new(registry),
        }
    }
}

/// Build the application state. An invalid permission table aborts startup.
pub fn init_app_state() -> Result<AppState, TableError> {
    build_app_state(JwtConfig::from_env(), AuthzConfig::from_env())
}

/// Build the application state from explicit configuration.
pub fn build_app_state(
    jwt_config: JwtConfig,
    authz_config: AuthzConfig,
) -> Result<AppState, TableError> {
    let registry = authz_config.build_registry().inspect_err(|err| {
        tracing::error!(error = %err, "Permission table rejected");
        track_table_rejected(rejection_reason(err));
    })?;

    tracing::info!(
        policy = ?authz_config.unknown_role_policy,
        external_table = authz_config.table_path.is_some(),
        "Authorization initialized"
    );

    Ok(AppState::new(jwt_config, authz_config, registry))
}

fn rejection_reason(err: &TableError) -> &'static str {
    match err {
        TableError::MissingRole(_) => "missing_role",
        TableError::DuplicateRole(_) => "duplicate_role",
        TableError::SuperAdminEntry => "super_admin_entry",
        TableError::SuperAdminIncomplete(_) => "super_admin_incomplete",
        TableError::OutsideUniverse { .. } => "outside_universe",
        TableError::Identifier(_) => "unknown_identifier",
        TableError::Parse(_) => "parse",
        TableError::Io { .. } => "io",
    }
}
