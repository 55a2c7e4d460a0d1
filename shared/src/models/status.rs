//! Status and type value sets for HR records
//!
//! Each set is stored as TEXT with a CHECK constraint, so the wire name,
//! the column value and `Display` are the same string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value: {0}")]
pub struct InvalidValue(pub String);

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = InvalidValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(InvalidValue(s.to_string())),
                }
            }
        }
    };
}

text_enum!(
    /// Employment status of an employee profile
    EmployeeStatus {
        Active => "Active",
        Suspended => "Suspended",
        Terminated => "Terminated",
    }
);

text_enum!(
    LeaveType {
        Annual => "Annual",
        Sick => "Sick",
        Medical => "Medical",
        Casual => "Casual",
        Unpaid => "Unpaid",
    }
);

text_enum!(
    /// Leave lifecycle: Pending -> Approved | Rejected
    LeaveStatus {
        Pending => "Pending",
        Approved => "Approved",
        Rejected => "Rejected",
    }
);

text_enum!(
    SalaryStatus {
        Pending => "Pending",
        Paid => "Paid",
        OnHold => "On-hold",
    }
);

text_enum!(
    TicketStatus {
        Open => "Open",
        InProgress => "In Progress",
        Closed => "Closed",
    }
);
