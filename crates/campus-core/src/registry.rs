//! Permission registry: the single authorization query surface.
//!
//! A [`PermissionRegistry`] owns a validated [`RoleAssignmentTable`] and answers
//! "does role R hold permission P?". It is built once at startup, never
//! mutated, and is `Send + Sync`, so it can be shared behind an `Arc` by any
//! number of request handlers.
//!
//! # Example
//!
//! ```
//! use campus_core::{Permission, PermissionRegistry, Role};
//!
//! let registry = PermissionRegistry::builtin();
//!
//! assert!(registry.has_permission(Role::Teacher, Permission::GradebookView));
//! assert!(!registry.has_permission(Role::Teacher, Permission::GradebookManage));
//!
//! // Untrusted identifiers go through the fallible boundary.
//! assert!(registry.check("guest", "user:read").is_err());
//! ```

use std::collections::HashSet;

use crate::permissions::{Permission, PermissionError};
use crate::roles::Role;
use crate::table::{RoleAssignmentTable, TableError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRegistry {
    table: RoleAssignmentTable,
}

impl PermissionRegistry {
    /// Accept a table after running its consistency check.
    pub fn new(table: RoleAssignmentTable) -> Result<Self, TableError> {
        table.validate()?;

        tracing::debug!(
            permissions = table.universe().len(),
            roles = Role::ALL.len(),
            "Permission registry initialized"
        );

        Ok(Self { table })
    }

    /// Registry over the compiled-in table.
    pub fn builtin() -> Self {
        Self {
            table: RoleAssignmentTable::builtin(),
        }
    }

    pub fn table(&self) -> &RoleAssignmentTable {
        &self.table
    }

    /// True iff `permission` is in the set assigned to `role`.
    pub fn has_permission(&self, role: Role, permission: Permission) -> bool {
        self.table.get(role).contains(&permission)
    }

    /// Full permission set of a role. Empty for a role with no grants.
    pub fn permissions_for(&self, role: Role) -> &HashSet<Permission> {
        self.table.get(role)
    }

    /// Every permission known to the registry.
    pub fn all_permissions(&self) -> &HashSet<Permission> {
        self.table.universe()
    }

    /// String boundary for role and permission identifiers from outside the
    /// process (token claims, CLI arguments).
    ///
    /// Unknown identifiers are errors, never a silent `false`.
    pub fn check(&self, role: &str, permission: &str) -> Result<bool, PermissionError> {
        let role: Role = role.parse()?;
        let permission: Permission = permission.parse()?;
        Ok(self.has_permission(role, permission))
    }

    pub fn permissions_for_str(&self, role: &str) -> Result<&HashSet<Permission>, PermissionError> {
        let role: Role = role.parse()?;
        Ok(self.permissions_for(role))
    }

    /// Roles holding `permission`, in [`Role::ALL`] order.
    pub fn roles_with(&self, permission: Permission) -> Vec<Role> {
        Role::ALL
            .iter()
            .copied()
            .filter(|role| self.has_permission(*role, permission))
            .collect()
    }

    /// Permissions that no role other than super-admin holds, sorted.
    pub fn orphaned_permissions(&self) -> Vec<Permission> {
        let mut orphaned: Vec<Permission> = self
            .all_permissions()
            .iter()
            .copied()
            .filter(|permission| {
                Role::ALL
                    .iter()
                    .filter(|role| **role != Role::SuperAdmin)
                    .all(|role| !self.has_permission(*role, *permission))
            })
            .collect();
        orphaned.sort();
        orphaned
    }
}

impl Default for PermissionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
