//! Wire error codes
//!
//! A single table fixes each code's number, default message and HTTP status.
//! Ranges: 0xxx general, 1xxx authentication, 2xxx permission, 8xxx HR
//! records, 9xxx server faults.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! error_codes {
    ($( $(#[$doc:meta])* $name:ident = $value:literal => $status:ident, $message:literal; )*) => {
        /// Numeric error code carried in every error body
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "u16", try_from = "u16")]
        #[repr(u16)]
        pub enum ErrorCode {
            $( $(#[$doc])* $name = $value, )*
        }

        impl ErrorCode {
            /// Every code in table order
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$name),*];

            /// Default client-facing message
            pub const fn message(&self) -> &'static str {
                match self {
                    $(ErrorCode::$name => $message,)*
                }
            }

            pub const fn http_status(&self) -> StatusCode {
                match self {
                    $(ErrorCode::$name => StatusCode::$status,)*
                }
            }
        }

        impl TryFrom<u16> for ErrorCode {
            type Error = InvalidErrorCode;

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(ErrorCode::$name),)*
                    _ => Err(InvalidErrorCode(value)),
                }
            }
        }
    };
}

error_codes! {
    Success = 0 => OK, "OK";
    ValidationFailed = 2 => BAD_REQUEST, "Validation failed";
    NotFound = 3 => NOT_FOUND, "Resource not found";
    /// Unique key already taken (e.g. a registered email)
    AlreadyExists = 4 => CONFLICT, "Resource already exists";
    InvalidRequest = 5 => BAD_REQUEST, "Invalid request";
    RequiredField = 7 => BAD_REQUEST, "Required field is missing";
    TooManyRequests = 9 => TOO_MANY_REQUESTS, "Too many requests, try again later";

    /// Missing, malformed, expired or orphaned token. One code for all of them.
    NotAuthenticated = 1001 => UNAUTHORIZED, "Authentication required";
    InvalidCredentials = 1002 => UNAUTHORIZED, "Invalid email or password";
    PasswordTooShort = 1008 => BAD_REQUEST, "Password must be at least 8 characters";
    ResetTokenInvalid = 1009 => BAD_REQUEST, "Invalid or expired reset token";

    /// Role or ownership denial. Never names the missing role.
    PermissionDenied = 2001 => FORBIDDEN, "Insufficient permissions";

    EmployeeNotFound = 8001 => NOT_FOUND, "Employee not found";
    AlreadyCheckedIn = 8201 => BAD_REQUEST, "Already checked in today";
    NotCheckedIn = 8202 => BAD_REQUEST, "No check-in found for today";
    LeaveNotFound = 8301 => NOT_FOUND, "Leave request not found";
    MedicalDocumentRequired = 8302 => BAD_REQUEST, "Medical certificate is required for medical leave";
    LeaveAlreadyDecided = 8303 => BAD_REQUEST, "Leave request has already been processed";
    SalaryNotFound = 8401 => NOT_FOUND, "Salary record not found";
    DocumentNotFound = 8501 => NOT_FOUND, "Document not found";
    FileTooLarge = 8502 => PAYLOAD_TOO_LARGE, "File too large";
    NoFileProvided = 8503 => BAD_REQUEST, "No file uploaded";
    AnnouncementNotFound = 8601 => NOT_FOUND, "Announcement not found";
    TicketNotFound = 8701 => NOT_FOUND, "Ticket not found";
    InvalidStatus = 8801 => BAD_REQUEST, "Invalid status";

    InternalError = 9001 => INTERNAL_SERVER_ERROR, "Internal server error";
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// 9xxx: a server fault rather than a client mistake
    pub const fn is_server_fault(&self) -> bool {
        self.code() >= 9000
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A number outside the code table
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);
