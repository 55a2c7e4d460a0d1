//! Resource type tags shared by the visibility predicate and the audit trail

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Employee,
    Attendance,
    Leave,
    Salary,
    Document,
    Announcement,
    Ticket,
    Setting,
    User,
}

impl ResourceType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Attendance => "attendance",
            Self::Leave => "leave",
            Self::Salary => "salary",
            Self::Document => "document",
            Self::Announcement => "announcement",
            Self::Ticket => "ticket",
            Self::Setting => "setting",
            Self::User => "user",
        }
    }

    /// Whether rows of this type belong to one employee
    pub const fn is_owned(&self) -> bool {
        matches!(
            self,
            Self::Employee
                | Self::Attendance
                | Self::Leave
                | Self::Salary
                | Self::Document
                | Self::Ticket
        )
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
