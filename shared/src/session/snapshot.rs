//! Session snapshot - wholesale copy of the billing state
//!
//! Written as one JSON document and never partially merged. Reading it back
//! is best-effort; the restaurant is stored by id only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Participant, PlateSelections};

/// Persisted session state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Restaurant id
    pub restaurant: String,
    /// Participants in creation order
    pub participants: Vec<Participant>,
    /// Participant id → plate key → count
    #[serde(default)]
    pub plate_selections: PlateSelections,
    /// When the snapshot was taken (RFC 3339)
    pub timestamp: DateTime<Utc>,
}

impl SessionSnapshot {
    pub fn new(
        restaurant: impl Into<String>,
        participants: Vec<Participant>,
        plate_selections: PlateSelections,
    ) -> Self {
        Self {
            restaurant: restaurant.into(),
            participants,
            plate_selections,
            timestamp: Utc::now(),
        }
    }

    /// Total plates across every participant
    pub fn total_plates(&self) -> u64 {
        self.plate_selections
            .values()
            .flat_map(|counts| counts.values())
            .map(|&c| u64::from(c))
            .sum()
    }
}
