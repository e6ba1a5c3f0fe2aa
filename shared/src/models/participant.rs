//! Participant Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Participant id, positive and unique within a session
pub type ParticipantId = u32;

/// Plate key → count for one participant. Counts are always positive.
pub type PlateCounts = BTreeMap<String, u32>;

/// Participant id → plate counts. A missing participant means zero plates.
pub type PlateSelections = BTreeMap<ParticipantId, PlateCounts>;

/// A diner tracked independently for bill splitting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// User-editable, may be empty or duplicated
    pub name: String,
}

impl Participant {
    /// New participant named after its id
    pub fn with_default_name(id: ParticipantId) -> Self {
        Self {
            id,
            name: id.to_string(),
        }
    }
}
