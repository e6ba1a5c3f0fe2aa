//! Data models
//!
//! Restaurant catalog records and the participant types the billing session
//! is built from.

pub mod participant;
pub mod restaurant;

pub use participant::{Participant, ParticipantId, PlateCounts, PlateSelections};
pub use restaurant::{CurrencyFormat, CurrencyPosition, Plate, Restaurant};
