//! The role → permissions assignment table.
//!
//! The built-in table is compiled in. A table can also be loaded from JSON at
//! startup, in which case it goes through the same consistency check before a
//! registry will accept it:
//!
//! ```json
//! {
//!   "admin": ["user:create", "campus:view"],
//!   "program_coordinator": ["user:read"],
//!   "teacher": ["user:read"],
//!   "student": [],
//!   "parent": ["user:read"]
//! }
//! ```
//!
//! super-admin never appears in the file. Its set is derived from the
//! permission universe, so it picks up new permissions without an edit here.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::permissions::{Permission, PermissionError};
use crate::roles::Role;

/// Errors raised while building or loading an assignment table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("role {0} has no entry in the assignment table")]
    MissingRole(Role),
    #[error("role {0} is listed more than once")]
    DuplicateRole(Role),
    #[error("super-admin permissions are derived and cannot be listed explicitly")]
    SuperAdminEntry,
    #[error("super-admin is missing {0}")]
    SuperAdminIncomplete(Permission),
    #[error("role {role} is granted {permission}, which is not a known permission")]
    OutsideUniverse { role: Role, permission: Permission },
    #[error(transparent)]
    Identifier(#[from] PermissionError),
    #[error("invalid assignment table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read assignment table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How a role's permission set is obtained.
#[derive(Debug, Clone, Copy)]
pub enum RoleGrant {
    /// Every permission in the universe.
    All,
    /// Exactly the listed permissions. Duplicates collapse.
    Only(&'static [Permission]),
}

/// Built-in grants.
pub fn builtin_grant(role: Role) -> RoleGrant {
    use Permission::*;

    match role {
        Role::SuperAdmin => RoleGrant::All,
        Role::Admin => RoleGrant::Only(&[
            UserCreate,
            UserRead,
            UserUpdate,
            UserDelete,
            RoleRead,
            SettingsManage,
            ClassGroupView,
            ClassGroupManage,
            GradebookView,
            GradebookOverview,
            GradebookManage,
            GradeActivity,
            GradeModify,
            CampusView,
            CampusManage,
            CampusDelete,
        ]),
        Role::ProgramCoordinator => RoleGrant::Only(&[
            UserRead,
            UserUpdate,
            ClassGroupView,
            ClassGroupManage,
            GradebookView,
            GradebookOverview,
            GradebookManage,
            GradeActivity,
        ]),
        Role::Teacher => RoleGrant::Only(&[
            UserRead,
            ClassGroupView,
            GradeActivity,
            GradebookView,
            GradebookOverview,
        ]),
        Role::Student => RoleGrant::Only(&[UserRead, ClassGroupView]),
        Role::Parent => RoleGrant::Only(&[UserRead]),
    }
}

/// Total mapping from every [`Role`] to its permission set.
///
/// Entries are stored positionally in [`Role::ALL`] order, so a role can never
/// be missing once a table exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignmentTable {
    universe: HashSet<Permission>,
    entries: [HashSet<Permission>; Role::ALL.len()],
}

/// Role entries in file order. Repeated keys are kept so they can be rejected.
struct RawEntries(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of role identifiers to permission lists")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Vec<String>>()? {
                    entries.push(entry);
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl RoleAssignmentTable {
    /// The compiled-in table over every known permission.
    pub fn builtin() -> Self {
        Self::derive(Permission::ALL, builtin_grant)
    }

    /// Build a table from a permission universe and a grant rule.
    pub fn derive<F>(universe: &[Permission], grants: F) -> Self
    where
        F: Fn(Role) -> RoleGrant,
    {
        let universe: HashSet<Permission> = universe.iter().copied().collect();
        let entries = std::array::from_fn(|index| {
            let role = Role::ALL[index];
            if role == Role::SuperAdmin {
                return universe.clone();
            }
            match grants(role) {
                RoleGrant::All => universe.clone(),
                RoleGrant::Only(permissions) => permissions.iter().copied().collect(),
            }
        });

        Self { universe, entries }
    }

    /// Parse a table from its JSON form. See the module docs for the format.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let RawEntries(raw) = serde_json::from_str(json)?;

        let mut listed: BTreeMap<Role, HashSet<Permission>> = BTreeMap::new();
        for (identifier, permissions) in raw {
            let role: Role = identifier.parse()?;
            if role == Role::SuperAdmin {
                return Err(TableError::SuperAdminEntry);
            }
            // canonical and alias spellings resolve to the same role
            if listed.contains_key(&role) {
                return Err(TableError::DuplicateRole(role));
            }
            let permissions = permissions
                .iter()
                .map(|identifier| identifier.parse::<Permission>())
                .collect::<Result<HashSet<_>, _>>()?;
            listed.insert(role, permissions);
        }

        for role in Role::ALL {
            if *role != Role::SuperAdmin && !listed.contains_key(role) {
                return Err(TableError::MissingRole(*role));
            }
        }

        let universe: HashSet<Permission> = Permission::ALL.iter().copied().collect();
        let entries = std::array::from_fn(|index| {
            let role = Role::ALL[index];
            if role == Role::SuperAdmin {
                universe.clone()
            } else {
                listed.remove(&role).unwrap_or_default()
            }
        });

        let table = Self { universe, entries };
        table.validate()?;
        Ok(table)
    }

    /// Read and parse a JSON table from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Consistency check run once before a registry accepts the table.
    pub fn validate(&self) -> Result<(), TableError> {
        let super_admin = self.get(Role::SuperAdmin);
        let mut universe: Vec<Permission> = self.universe.iter().copied().collect();
        universe.sort();
        if let Some(missing) = universe.iter().find(|p| !super_admin.contains(*p)) {
            return Err(TableError::SuperAdminIncomplete(*missing));
        }

        for role in Role::ALL {
            let mut granted: Vec<Permission> = self.get(*role).iter().copied().collect();
            granted.sort();
            if let Some(permission) = granted.into_iter().find(|p| !self.universe.contains(p)) {
                return Err(TableError::OutsideUniverse {
                    role: *role,
                    permission,
                });
            }
        }

        Ok(())
    }

    /// The permission set for a role.
    pub fn get(&self, role: Role) -> &HashSet<Permission> {
        &self.entries[role.index()]
    }

    /// Every permission this table was built over.
    pub fn universe(&self) -> &HashSet<Permission> {
        &self.universe
    }

    /// Export in the same format [`RoleAssignmentTable::from_json`] reads.
    pub fn to_json_value(&self) -> Value {
        let mut object = Map::new();
        for role in Role::ALL.iter().filter(|r| **r != Role::SuperAdmin) {
            let mut permissions: Vec<Permission> = self.get(*role).iter().copied().collect();
            permissions.sort();
            let permissions = permissions
                .into_iter()
                .map(|p| Value::String(p.as_str().to_string()))
                .collect();
            object.insert(role.as_str().to_string(), Value::Array(permissions));
        }
        Value::Object(object)
    }
}

impl Default for RoleAssignmentTable {
    fn default() -> Self {
        Self::builtin()
    }
}
