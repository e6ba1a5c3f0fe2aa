//! Unified error codes for the Kaiten calculator
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Catalog errors
//! - 2xxx: Session errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they serialize the same
/// way for every consumer of the snapshot and summary payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Document could not be decoded
    InvalidFormat = 4,

    // ==================== 1xxx: Catalog ====================
    /// A restaurant document could not be read or parsed
    CatalogLoadFailed = 1001,
    /// No restaurant could be loaded at all
    CatalogEmpty = 1002,
    /// Restaurant id is not part of the catalog
    RestaurantNotFound = 1003,
    /// Restaurant document failed validation
    InvalidRestaurant = 1004,

    // ==================== 2xxx: Session ====================
    /// Operation needs a selected restaurant
    NoRestaurantSelected = 2001,
    /// Summary requested with zero plates selected
    NoPlatesSelected = 2002,
    /// Stored snapshot could not be decoded
    SnapshotCorrupted = 2003,
    /// Snapshot could not be written
    SnapshotWriteFailed = 2004,
    /// Transition not allowed from the current stage
    InvalidStage = 2005,

    // ==================== 9xxx: System ====================
    /// Filesystem error
    IoError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::InvalidFormat => "Invalid format",

            // Catalog
            ErrorCode::CatalogLoadFailed => "Failed to load restaurant data",
            ErrorCode::CatalogEmpty => {
                "Failed to load restaurant data. Please refresh the page."
            }
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::InvalidRestaurant => "Invalid restaurant configuration",

            // Session
            ErrorCode::NoRestaurantSelected => "No restaurant selected to save session.",
            ErrorCode::NoPlatesSelected => {
                "Please select at least one plate before viewing the summary."
            }
            ErrorCode::SnapshotCorrupted => "Saved session is corrupted",
            ErrorCode::SnapshotWriteFailed => "Failed to save session",
            ErrorCode::InvalidStage => "Operation not allowed in the current stage",

            // System
            ErrorCode::IoError => "File system error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            4 => Ok(ErrorCode::InvalidFormat),

            // Catalog
            1001 => Ok(ErrorCode::CatalogLoadFailed),
            1002 => Ok(ErrorCode::CatalogEmpty),
            1003 => Ok(ErrorCode::RestaurantNotFound),
            1004 => Ok(ErrorCode::InvalidRestaurant),

            // Session
            2001 => Ok(ErrorCode::NoRestaurantSelected),
            2002 => Ok(ErrorCode::NoPlatesSelected),
            2003 => Ok(ErrorCode::SnapshotCorrupted),
            2004 => Ok(ErrorCode::SnapshotWriteFailed),
            2005 => Ok(ErrorCode::InvalidStage),

            // System
            9003 => Ok(ErrorCode::IoError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
