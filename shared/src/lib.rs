//! Shared types for the Kaiten calculator
//!
//! Restaurant catalog records, participant and plate-selection types, the
//! session snapshot format, and the unified error system.

pub mod error;
pub mod models;
pub mod session;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{
    CurrencyFormat, CurrencyPosition, Participant, ParticipantId, Plate, PlateCounts,
    PlateSelections, Restaurant,
};
pub use serde::{Deserialize, Serialize};
pub use session::SessionSnapshot;
