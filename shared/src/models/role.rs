//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed permission tier of a principal.
///
/// The set is closed: roles are never created at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Director,
    Admin,
    #[serde(rename = "HR")]
    Hr,
    Finance,
    Employee,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Director,
        Role::Admin,
        Role::Hr,
        Role::Finance,
        Role::Employee,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Director => "Director",
            Role::Admin => "Admin",
            Role::Hr => "HR",
            Role::Finance => "Finance",
            Role::Employee => "Employee",
        }
    }

    /// Roles that see and act on every employee's records
    pub const fn is_elevated(&self) -> bool {
        matches!(self, Role::Director | Role::Admin | Role::Hr)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("hr".parse::<Role>().is_err());
        assert!("Manager".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_uses_display_names() {
        assert_eq!(serde_json::to_string(&Role::Hr).unwrap(), "\"HR\"");
        let role: Role = serde_json::from_str("\"Finance\"").unwrap();
        assert_eq!(role, Role::Finance);
    }

    #[test]
    fn test_elevated_roles() {
        assert!(Role::Director.is_elevated());
        assert!(Role::Admin.is_elevated());
        assert!(Role::Hr.is_elevated());
        assert!(!Role::Finance.is_elevated());
        assert!(!Role::Employee.is_elevated());
    }
}
