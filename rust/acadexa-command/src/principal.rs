//! The authenticated actor behind a command.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownRole;

/// The closed set of roles the identity layer hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Sees everything, fees included.
    Admin,
    /// Head of department.
    Hod,
    /// Sees the courses they teach.
    Teacher,
    /// Sees their own records.
    Student,
}

impl Role {
    /// Lower-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Hod => "hod",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    /// Accepts any casing, as identity providers disagree on it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "hod" => Ok(Role::Hod),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Who is asking, as supplied by the identity layer.
///
/// `student_id` and `teacher_id` link the account to its profile record.
/// They are optional because accounts can exist before their profile is
/// created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Account id.
    pub id: i64,
    /// What the account may do.
    pub role: Role,
    /// Linked student profile.
    #[serde(default)]
    pub student_id: Option<i64>,
    /// Linked teacher profile.
    #[serde(default)]
    pub teacher_id: Option<i64>,
}

impl Principal {
    /// An admin account.
    pub fn admin(id: i64) -> Self {
        Self {
            id,
            role: Role::Admin,
            student_id: None,
            teacher_id: None,
        }
    }

    /// A head-of-department account.
    pub fn hod(id: i64) -> Self {
        Self {
            id,
            role: Role::Hod,
            student_id: None,
            teacher_id: None,
        }
    }

    /// A teacher account, linked to `teacher_id` if given.
    pub fn teacher(id: i64, teacher_id: Option<i64>) -> Self {
        Self {
            id,
            role: Role::Teacher,
            student_id: None,
            teacher_id,
        }
    }

    /// A student account, linked to `student_id` if given.
    pub fn student(id: i64, student_id: Option<i64>) -> Self {
        Self {
            id,
            role: Role::Student,
            student_id,
            teacher_id: None,
        }
    }
}

/// The one place authorization code reads a principal's role from.
pub fn role_of(principal: &Principal) -> Role {
    principal.role
}
