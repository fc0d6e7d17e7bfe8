use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller roles for the admin surface.
///
/// The order of variants matters: it defines the privilege hierarchy.
/// `Public` is the least privileged, `Admin` is the most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Unauthenticated read-only access.
    Public = 0,
    /// Content editors: may create and update resources.
    Subadmin = 1,
    /// Full administrative access, including deletes.
    Admin = 2,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Public => write!(f, "public"),
            Role::Subadmin => write!(f, "subadmin"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl Role {
    /// Parse a role from a string (case-insensitive).
    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "public" => Some(Role::Public),
            "subadmin" => Some(Role::Subadmin),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Returns `true` if `self` has at least the required role.
    pub fn has_access(&self, required: Role) -> bool {
        *self >= required
    }
}
