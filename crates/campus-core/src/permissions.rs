//! Permission identifiers for the Campus API.
//!
//! Every permission the system knows about is a variant of [`Permission`].
//! The wire form follows the `resource:action` convention (`"user:create"`,
//! `"gradebook:overview"`) and is pinned by the serde rename on each variant,
//! so these strings are safe to persist against user records.
//!
//! # Example
//!
//! ```
//! use campus_core::permissions::Permission;
//!
//! let permission: Permission = "gradebook:overview".parse().unwrap();
//! assert_eq!(permission, Permission::GradebookOverview);
//! assert_eq!(permission.resource(), "gradebook");
//! assert!("gradebook:destroy".parse::<Permission>().is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Errors raised when an identifier crosses into the registry from outside.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// The role identifier is not one of the enumerated roles.
    #[error("unknown role: {0}")]
    UnknownRole(String),
    /// The permission identifier is not one of the enumerated permissions.
    #[error("unknown permission: {0}")]
    UnknownPermission(String),
}

/// Declares the permission enum together with its canonical list and
/// identifier strings, so that a new line here extends [`Permission::ALL`].
macro_rules! define_permissions {
    ($( $(#[$meta:meta])* $variant:ident => $name:literal, )+) => {
        /// A single allowed action on a resource class.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
        )]
        pub enum Permission {
            $(
                $(#[$meta])*
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl Permission {
            /// Every permission, in declaration order.
            pub const ALL: &'static [Permission] = &[$(Permission::$variant,)+];

            /// The stable `resource:action` identifier.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Permission::$variant => $name,)+
                }
            }
        }
    };
}

define_permissions! {
    // User
    UserCreate => "user:create",
    UserRead => "user:read",
    UserUpdate => "user:update",
    UserDelete => "user:delete",

    // Role
    RoleCreate => "role:create",
    RoleRead => "role:read",
    RoleUpdate => "role:update",
    RoleDelete => "role:delete",

    /// Manage the permission catalogue itself
    PermissionManage => "permission:manage",

    SettingsManage => "settings:manage",

    // Campus (buildings, floors, wings, rooms)
    CampusView => "campus:view",
    CampusManage => "campus:manage",
    CampusDelete => "campus:delete",

    // Academic calendar
    AcademicCalendarView => "academic-calendar:view",
    AcademicCalendarManage => "academic-calendar:manage",
    AcademicYearManage => "academic-year:manage",
    EventManage => "event:manage",

    // Program
    ProgramView => "program:view",
    ProgramManage => "program:manage",
    ProgramDelete => "program:delete",

    // Class group
    ClassGroupView => "class-group:view",
    ClassGroupManage => "class-group:manage",
    ClassGroupDelete => "class-group:delete",

    // Class
    ClassView => "class:view",
    ClassManage => "class:manage",
    ClassDelete => "class:delete",
    ClassAssignTeachers => "class:assign-teachers",
    ClassAssignStudents => "class:assign-students",

    // Gradebook
    GradebookView => "gradebook:view",
    GradebookOverview => "gradebook:overview",
    GradebookManage => "gradebook:manage",
    GradeActivity => "grade:activity",
    GradeModify => "grade:modify",

    // Subject
    SubjectView => "subject:view",
    SubjectManage => "subject:manage",
    SubjectDelete => "subject:delete",
    SubjectAssignTeachers => "subject:assign-teachers",
}

impl Permission {
    /// The resource half of the identifier (`"class-group"` for `class-group:view`).
    pub fn resource(self) -> &'static str {
        self.as_str()
            .split_once(':')
            .map(|(resource, _)| resource)
            .unwrap_or_else(|| self.as_str())
    }

    /// The action half of the identifier (`"view"` for `class-group:view`).
    pub fn action(self) -> &'static str {
        self.as_str()
            .split_once(':')
            .map(|(_, action)| action)
            .unwrap_or("")
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .copied()
            .find(|permission| permission.as_str() == s)
            .ok_or_else(|| PermissionError::UnknownPermission(s.to_string()))
    }
}

impl From<Permission> for String {
    fn from(permission: Permission) -> Self {
        permission.as_str().to_string()
    }
}
