use std::env;
use std::path::PathBuf;

use campus_core::{PermissionRegistry, RoleAssignmentTable, TableError};

/// What the request edge does when a token carries a role it does not know.
///
/// Both variants deny the request. They differ in how loudly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnknownRolePolicy {
    /// Respond 500 and log at error level. Default outside production.
    Fail,
    /// Respond 403 and log at warn level. Default in production.
    Deny,
}

impl UnknownRolePolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "fail" => Some(Self::Fail),
            "deny" => Some(Self::Deny),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AuthzConfig {
    pub unknown_role_policy: UnknownRolePolicy,
    /// JSON assignment table to load instead of the compiled-in one.
    pub table_path: Option<PathBuf>,
}

impl AuthzConfig {
    pub fn from_env() -> Self {
        Self::resolve(
            env::var("APP_ENV").ok(),
            env::var("AUTHZ_UNKNOWN_ROLE_POLICY").ok(),
            env::var("PERMISSION_TABLE_PATH").ok(),
        )
    }

    fn resolve(
        app_env: Option<String>,
        policy: Option<String>,
        table_path: Option<String>,
    ) -> Self {
        let production = app_env
            .as_deref()
            .is_some_and(|env| env.eq_ignore_ascii_case("production"));
        let default_policy = if production {
            UnknownRolePolicy::Deny
        } else {
            UnknownRolePolicy::Fail
        };

        let unknown_role_policy = match policy.as_deref() {
            None => default_policy,
            Some(value) => UnknownRolePolicy::parse(value).unwrap_or_else(|| {
                tracing::warn!(
                    value = %value,
                    "Unrecognized AUTHZ_UNKNOWN_ROLE_POLICY, using environment default"
                );
                default_policy
            }),
        };

        Self {
            unknown_role_policy,
            table_path: table_path
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Build the process-wide registry. Fails fast on an invalid table.
    pub fn build_registry(&self) -> Result<PermissionRegistry, TableError> {
        let table = match &self.table_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading permission table");
                RoleAssignmentTable::load(path)?
            }
            None => RoleAssignmentTable::builtin(),
        };

        PermissionRegistry::new(table)
    }
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            unknown_role_policy: UnknownRolePolicy::Fail,
            table_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_defaults_to_fail() {
        let config = AuthzConfig::resolve(None, None, None);
        assert_eq!(config.unknown_role_policy, UnknownRolePolicy::Fail);
        assert!(config.table_path.is_none());

        let config = AuthzConfig::resolve(Some("development".into()), None, None);
        assert_eq!(config.unknown_role_policy, UnknownRolePolicy::Fail);
    }

    #[test]
    fn test_production_defaults_to_deny() {
        let config = AuthzConfig::resolve(Some("Production".into()), None, None);
        assert_eq!(config.unknown_role_policy, UnknownRolePolicy::Deny);
    }

    #[test]
    fn test_explicit_policy_wins() {
        let config = AuthzConfig::resolve(Some("production".into()), Some("fail".into()), None);
        assert_eq!(config.unknown_role_policy, UnknownRolePolicy::Fail);

        let config = AuthzConfig::resolve(None, Some(" DENY ".into()), None);
        assert_eq!(config.unknown_role_policy, UnknownRolePolicy::Deny);
    }

    #[test]
    fn test_invalid_policy_falls_back() {
        let config = AuthzConfig::resolve(Some("production".into()), Some("allow".into()), None);
        assert_eq!(config.unknown_role_policy, UnknownRolePolicy::Deny);
    }

    #[test]
    fn test_blank_table_path_ignored() {
        let config = AuthzConfig::resolve(None, None, Some("  ".into()));
        assert!(config.table_path.is_none());

        let config = AuthzConfig::resolve(None, None, Some("/etc/campus/permissions.json".into()));
        assert_eq!(
            config.table_path,
            Some(PathBuf::from("/etc/campus/permissions.json"))
        );
    }

    #[test]
    fn test_build_registry_builtin() {
        let registry = AuthzConfig::default().build_registry().unwrap();
        assert_eq!(registry, PermissionRegistry::builtin());
    }

    #[test]
    fn test_build_registry_missing_file_fails_fast() {
        let config = AuthzConfig {
            table_path: Some(PathBuf::from("/nonexistent/permissions.json")),
            ..AuthzConfig::default()
        };
        assert!(matches!(
            config.build_registry(),
            Err(TableError::Io { .. })
        ));
    }
}
