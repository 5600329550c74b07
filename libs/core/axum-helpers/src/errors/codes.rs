//! Type-safe error codes for API responses.
//!
//! Single source of truth for the error codes used across the application.
//! Each code carries:
//! - String representation for client consumption (e.g., "VALIDATION_ERROR")
//! - Integer code for logging and monitoring (e.g., 1001)
//! - Default human-readable message

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
///
/// Codes are organized into ranges:
/// - 1000-1999: Client errors
/// - 2000-2999: Database errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Invalid ObjectId format in a path parameter
    InvalidObjectId,

    /// Malformed request
    BadRequest,

    /// Requested resource was not found
    NotFound,

    /// An unexpected internal server error occurred
    InternalError,

    // Database errors (2000-2999)
    /// Database command failed
    DatabaseCommand,

    /// Database write failed
    DatabaseWrite,

    /// Database I/O error
    DatabaseIo,

    /// Database server selection timed out
    DatabaseTimeout,

    /// Failed to decode a stored document
    DatabaseDecode,

    /// Failed to encode a document for the database
    DatabaseEncode,

    /// Unhandled database error
    DatabaseUnhandled,
}

impl ErrorCode {
    /// String representation for client consumption.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidObjectId => "INVALID_OBJECT_ID",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseCommand => "DATABASE_COMMAND",
            Self::DatabaseWrite => "DATABASE_WRITE",
            Self::DatabaseIo => "DATABASE_IO",
            Self::DatabaseTimeout => "DATABASE_TIMEOUT",
            Self::DatabaseDecode => "DATABASE_DECODE",
            Self::DatabaseEncode => "DATABASE_ENCODE",
            Self::DatabaseUnhandled => "DATABASE_UNHANDLED",
        }
    }

    /// Integer code for structured logs and metrics.
    pub fn code(&self) -> i32 {
        match self {
            // Client errors (1000-1999)
            Self::ValidationError => 1001,
            Self::InvalidObjectId => 1002,
            Self::BadRequest => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,

            // Database errors (2000-2999)
            Self::DatabaseCommand => 2001,
            Self::DatabaseWrite => 2002,
            Self::DatabaseIo => 2003,
            Self::DatabaseTimeout => 2004,
            Self::DatabaseDecode => 2005,
            Self::DatabaseEncode => 2006,
            Self::DatabaseUnhandled => 2099,
        }
    }

    /// Default user-facing message; handlers may override with specifics.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidObjectId => "Invalid object id format",
            Self::BadRequest => "Malformed request",
            Self::NotFound => "Resource not found",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseCommand => "Database command failed",
            Self::DatabaseWrite => "Database write failed",
            Self::DatabaseIo => "Database I/O error",
            Self::DatabaseTimeout => "Database is unreachable",
            Self::DatabaseDecode => "Failed to decode database response",
            Self::DatabaseEncode => "Failed to encode database request",
            Self::DatabaseUnhandled => "Unhandled database error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
