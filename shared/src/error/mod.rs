//! Unified error system for the Kaiten calculator
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Catalog errors
//! - 2xxx: Session errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::NoPlatesSelected);
//! assert_eq!(err.code.code(), 2002);
//!
//! let err = AppError::catalog_load("sushiro.json", "unexpected end of input")
//!     .with_detail("attempt", 1);
//! assert!(err.detail("file").is_some());
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
