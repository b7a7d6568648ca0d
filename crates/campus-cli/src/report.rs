//! Text and JSON renderings of the permission matrix.

use std::fmt::Write;

use campus_core::{Permission, PermissionError, PermissionRegistry, Role};

/// Outcome of `campus-cli check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    Granted,
    Denied,
    Invalid(PermissionError),
}

impl CheckResult {
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckResult::Granted => 0,
            CheckResult::Denied => 1,
            CheckResult::Invalid(_) => 2,
        }
    }
}

pub fn check(registry: &PermissionRegistry, role: &str, permission: &str) -> CheckResult {
    match registry.check(role, permission) {
        Ok(true) => CheckResult::Granted,
        Ok(false) => CheckResult::Denied,
        Err(err) => CheckResult::Invalid(err),
    }
}

/// One line per role with its permission count.
pub fn roles_report(registry: &PermissionRegistry) -> String {
    let mut out = String::new();
    for role in Role::ALL {
        let _ = writeln!(
            out,
            "{:<22} {:<20} {:>3} permissions",
            role.as_str(),
            role.display_name(),
            registry.permissions_for(*role).len()
        );
    }
    out
}

/// Sorted permission identifiers, for one role or the whole catalogue.
///
/// Without a role, each line also lists the roles that hold the permission.
pub fn permissions_report(registry: &PermissionRegistry, role: Option<Role>) -> String {
    let mut out = String::new();
    match role {
        Some(role) => {
            for permission in sorted(registry.permissions_for(role).iter().copied()) {
                let _ = writeln!(out, "{}", permission);
            }
        }
        None => {
            for permission in sorted(registry.all_permissions().iter().copied()) {
                let holders: Vec<&str> = registry
                    .roles_with(permission)
                    .into_iter()
                    .map(Role::as_str)
                    .collect();
                let _ = writeln!(out, "{:<28} {}", permission.as_str(), holders.join(", "));
            }
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    pub total_permissions: usize,
    pub orphaned: Vec<Permission>,
    pub empty_roles: Vec<Role>,
}

pub fn audit(registry: &PermissionRegistry) -> AuditReport {
    AuditReport {
        total_permissions: registry.all_permissions().len(),
        orphaned: registry.orphaned_permissions(),
        empty_roles: Role::ALL
            .iter()
            .copied()
            .filter(|role| registry.permissions_for(*role).is_empty())
            .collect(),
    }
}

impl std::fmt::Display for AuditReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Permissions: {}", self.total_permissions)?;

        if self.orphaned.is_empty() {
            writeln!(f, "Orphaned permissions: none")?;
        } else {
            writeln!(
                f,
                "Orphaned permissions (held only by super-admin): {}",
                self.orphaned.len()
            )?;
            for permission in &self.orphaned {
                writeln!(f, "  - {}", permission)?;
            }
        }

        if !self.empty_roles.is_empty() {
            let names: Vec<&str> = self.empty_roles.iter().map(|r| r.as_str()).collect();
            writeln!(f, "Roles with no permissions: {}", names.join(", "))?;
        }

        Ok(())
    }
}

/// JSON in the format `PERMISSION_TABLE_PATH` accepts.
pub fn export(registry: &PermissionRegistry, pretty: bool) -> Result<String, serde_json::Error> {
    let value = registry.table().to_json_value();
    if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
}

fn sorted(permissions: impl Iterator<Item = Permission>) -> Vec<Permission> {
    let mut permissions: Vec<Permission> = permissions.collect();
    permissions.sort();
    permissions
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::RoleAssignmentTable;

    #[test]
    fn test_check_exit_codes() {
        let registry = PermissionRegistry::builtin();
        assert_eq!(check(&registry, "admin", "campus:delete"), CheckResult::Granted);
        assert_eq!(check(&registry, "parent", "user:create").exit_code(), 1);
        assert_eq!(check(&registry, "guest", "user:read").exit_code(), 2);
        assert_eq!(
            check(&registry, "admin", "campus:burn"),
            CheckResult::Invalid(PermissionError::UnknownPermission(
                "campus:burn".to_string()
            ))
        );
    }

    #[test]
    fn test_roles_report_lists_every_role() {
        let report = roles_report(&PermissionRegistry::builtin());
        assert_eq!(report.lines().count(), Role::ALL.len());
        assert!(report.contains("program_coordinator"));
        assert!(report.lines().any(|l| l.starts_with("parent") && l.contains("  1 permissions")));
    }

    #[test]
    fn test_permissions_report_for_role() {
        let report = permissions_report(&PermissionRegistry::builtin(), Some(Role::Student));
        assert_eq!(report, "user:read\nclass-group:view\n");
    }

    #[test]
    fn test_permissions_report_catalogue() {
        let report = permissions_report(&PermissionRegistry::builtin(), None);
        assert_eq!(report.lines().count(), Permission::ALL.len());
        let line = report
            .lines()
            .find(|l| l.starts_with("gradebook:manage"))
            .unwrap();
        assert!(line.ends_with("super-admin, admin, program_coordinator"));
    }

    #[test]
    fn test_audit_builtin() {
        let report = audit(&PermissionRegistry::builtin());
        assert_eq!(report.total_permissions, 37);
        assert!(report.orphaned.contains(&Permission::EventManage));
        assert!(report.empty_roles.is_empty());
        assert!(report.to_string().contains("  - event:manage"));
    }

    #[test]
    fn test_audit_reports_empty_roles() {
        let json = r#"{
            "admin": ["user:read"],
            "program_coordinator": [],
            "teacher": [],
            "student": [],
            "parent": []
        }"#;
        let registry = PermissionRegistry::new(RoleAssignmentTable::from_json(json).unwrap()).unwrap();
        let report = audit(&registry);
        assert_eq!(
            report.empty_roles,
            vec![Role::ProgramCoordinator, Role::Teacher, Role::Student, Role::Parent]
        );
        assert!(report.to_string().contains("Roles with no permissions"));
    }

    #[test]
    fn test_export_reloads() {
        let registry = PermissionRegistry::builtin();
        let json = export(&registry, true).unwrap();
        let reloaded = RoleAssignmentTable::from_json(&json).unwrap();
        assert_eq!(&reloaded, registry.table());
    }
}
