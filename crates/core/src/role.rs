// Portal roles
//
// A role decides which route tree a session may open and which API
// capabilities the server grants it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// User role carried in the token's `role` claim.
/// - `STUDENT`: academic records, results, documents, schedules
/// - `FACULTY`: own profile
/// - `ADMIN`: bulk uploads and notices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Faculty, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Faculty => "FACULTY",
            Role::Admin => "ADMIN",
        }
    }

    /// Landing page of the role's route tree (`"/" + lowercase(role)`)
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Student => "/student",
            Role::Faculty => "/faculty",
            Role::Admin => "/admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}' (expected STUDENT, FACULTY or ADMIN)")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STUDENT" => Ok(Role::Student),
            "FACULTY" => Ok(Role::Faculty),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}
