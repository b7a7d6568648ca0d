//! Built-in roles.
//!
//! Roles are a closed set. The identifiers are persisted against user records
//! and carried in access tokens, so they must never be renamed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::permissions::PermissionError;

/// Declares the role enum together with its canonical list, identifiers and
/// display names. [`Role::ALL`] and the table slot of each role come from the
/// same list, so a role cannot exist without a place in the table.
macro_rules! define_roles {
    ($( $(#[$meta:meta])* $variant:ident => $name:literal $(| $alias:literal)*, $display:literal; )+) => {
        /// A named bundle of permissions assignable to a user.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
        )]
        pub enum Role {
            $(
                $(#[$meta])*
                #[serde(rename = $name $(, alias = $alias)*)]
                $variant,
            )+
        }

        impl Role {
            /// Every role, in declaration order.
            pub const ALL: &'static [Role] = &[$(Role::$variant,)+];

            /// The stable identifier stored against user records.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Role::$variant => $name,)+
                }
            }

            /// Human readable name for tooling output.
            pub const fn display_name(self) -> &'static str {
                match self {
                    $(Role::$variant => $display,)+
                }
            }

            /// Position of this role in [`Role::ALL`].
            pub const fn index(self) -> usize {
                self as usize
            }
        }

        impl FromStr for Role {
            type Err = PermissionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name $(| $alias)* => Ok(Role::$variant),)+
                    _ => Err(PermissionError::UnknownRole(s.to_string())),
                }
            }
        }
    };
}

define_roles! {
    /// Holds every permission, including ones added later.
    SuperAdmin => "super-admin", "Super Admin";
    Admin => "admin", "Admin";
    ProgramCoordinator => "program_coordinator" | "program-coordinator", "Program Coordinator";
    Teacher => "teacher", "Teacher";
    Student => "student", "Student";
    Parent => "parent", "Parent";
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_canonical_identifier() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(*role));
        }
    }

    #[test]
    fn test_program_coordinator_alias() {
        assert_eq!(
            "program-coordinator".parse::<Role>(),
            Ok(Role::ProgramCoordinator)
        );
        let parsed: Role = serde_json::from_str(r#""program-coordinator""#).unwrap();
        assert_eq!(parsed, Role::ProgramCoordinator);
        // the alias is accepted, never emitted
        assert_eq!(
            serde_json::to_string(&Role::ProgramCoordinator).unwrap(),
            r#""program_coordinator""#
        );
    }

    #[test]
    fn test_parse_unknown_role() {
        assert_eq!(
            "guest".parse::<Role>(),
            Err(PermissionError::UnknownRole("guest".to_string()))
        );
        assert!("Admin".parse::<Role>().is_err());
        assert!("super_admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_identifiers() {
        assert_eq!(
            serde_json::to_string(&Role::SuperAdmin).unwrap(),
            r#""super-admin""#
        );
        assert!(serde_json::from_str::<Role>(r#""guest""#).is_err());
    }

    #[test]
    fn test_index_matches_position_in_all() {
        for (position, role) in Role::ALL.iter().enumerate() {
            assert_eq!(role.index(), position, "{}", role);
        }
        assert_eq!(Role::Parent.index(), Role::ALL.len() - 1);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Role::ProgramCoordinator.display_name(), "Program Coordinator");
    }
}
