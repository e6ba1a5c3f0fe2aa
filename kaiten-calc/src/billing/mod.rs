//! Billing session
//!
//! In-memory state of one table: the selected restaurant, the participants in
//! creation order, their plate counts, and which participant is being edited.
//!
//! Invariants:
//! - after a restaurant is selected there is always at least one participant
//! - stored plate counts are positive; reaching zero removes the entry
//! - new participant ids are `max(existing) + 1`
//! - a single plate count never exceeds [`MAX_PLATE_COUNT`]

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    CurrencyFormat, Participant, ParticipantId, PlateCounts, PlateSelections, Restaurant,
};
use shared::session::SessionSnapshot;

use crate::apportion::{self, Bill};
use crate::catalog::Catalog;
use crate::money;

/// Maximum count of one plate type for one participant
pub const MAX_PLATE_COUNT: u32 = 9999;

/// Live counters shown while plates are being picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningTotals {
    pub plates: u64,
    /// Sum of plate prices, before service charge and VAT
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct BillingSession {
    restaurant: Option<Restaurant>,
    participants: Vec<Participant>,
    plate_selections: PlateSelections,
    current_participant_index: usize,
}

impl BillingSession {
    /// Empty session, no restaurant selected yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Session for a freshly selected restaurant
    pub fn for_restaurant(restaurant: Restaurant) -> Self {
        let mut session = Self::new();
        session.select_restaurant(restaurant);
        session
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn restaurant(&self) -> Option<&Restaurant> {
        self.restaurant.as_ref()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn plate_selections(&self) -> &PlateSelections {
        &self.plate_selections
    }

    pub fn current_participant_index(&self) -> usize {
        self.current_participant_index
    }

    /// Participant currently being edited, if the index points at one
    pub fn active_participant(&self) -> Option<&Participant> {
        self.participants.get(self.current_participant_index)
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Count of one plate type for a participant; 0 when absent
    pub fn plate_count(&self, participant_id: ParticipantId, plate_key: &str) -> u32 {
        self.plate_selections
            .get(&participant_id)
            .and_then(|counts| counts.get(plate_key))
            .copied()
            .unwrap_or(0)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Start over with `restaurant`: one participant `{1, "1"}`, no plates
    pub fn select_restaurant(&mut self, restaurant: Restaurant) {
        tracing::info!(restaurant = %restaurant.id, "Restaurant selected");
        self.restaurant = Some(restaurant);
        self.reset();
    }

    /// Back to a single default participant, keeping the restaurant
    pub fn reset(&mut self) {
        self.participants = vec![Participant::with_default_name(1)];
        self.plate_selections = PlateSelections::from([(1, PlateCounts::new())]);
        self.current_participant_index = 0;
    }

    /// Append a participant with id `max + 1`, named after the id
    ///
    /// Returns `None` and does nothing when the session has no participants.
    pub fn add_participant(&mut self) -> Option<ParticipantId> {
        let new_id = self.participants.iter().map(|p| p.id).max()? + 1;

        self.participants.push(Participant::with_default_name(new_id));
        self.plate_selections.insert(new_id, PlateCounts::new());
        tracing::debug!(participant_id = new_id, "Participant added");
        Some(new_id)
    }

    /// Remove a participant and their plates
    ///
    /// The last participant is never removed. Returns whether anything changed.
    pub fn remove_participant(&mut self, id: ParticipantId) -> bool {
        if self.participants.len() <= 1 {
            return false;
        }

        let before = self.participants.len();
        self.participants.retain(|p| p.id != id);
        if self.participants.len() == before {
            return false;
        }
        self.plate_selections.remove(&id);

        if self.current_participant_index >= self.participants.len() {
            self.current_participant_index = 0;
        }
        tracing::debug!(participant_id = id, "Participant removed");
        true
    }

    /// Set a participant's name verbatim. Returns false for an unknown id.
    pub fn rename_participant(&mut self, id: ParticipantId, name: impl Into<String>) -> bool {
        match self.participants.iter_mut().find(|p| p.id == id) {
            Some(participant) => {
                participant.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Choose who plate adjustments apply to
    ///
    /// Not bounds-checked: an index past the end leaves no active participant
    /// and plate adjustments become no-ops until a valid index is set.
    pub fn set_active_participant(&mut self, index: usize) {
        self.current_participant_index = index;
    }

    /// Add `delta` plates of `plate_key` for the active participant
    ///
    /// The count stays within `0..=MAX_PLATE_COUNT` and a zero count removes
    /// the entry.
    /// Returns whether the stored count changed; without an active
    /// participant nothing happens.
    pub fn adjust_plate_count(&mut self, plate_key: &str, delta: i64) -> bool {
        let Some(participant_id) = self.active_participant().map(|p| p.id) else {
            return false;
        };

        let counts = self.plate_selections.entry(participant_id).or_default();
        let current = counts.get(plate_key).copied().unwrap_or(0);
        let new_count = i64::from(current)
            .saturating_add(delta)
            .clamp(0, i64::from(MAX_PLATE_COUNT)) as u32;

        if new_count == 0 {
            counts.remove(plate_key);
        } else {
            counts.insert(plate_key.to_string(), new_count);
        }
        new_count != current
    }

    // ========================================================================
    // Calculations
    // ========================================================================

    pub fn participant_plates(&self, participant_id: ParticipantId) -> u64 {
        apportion::participant_plates(&self.plate_selections, participant_id)
    }

    pub fn participant_amount(&self, participant_id: ParticipantId) -> Decimal {
        apportion::participant_amount(
            &self.plate_selections,
            participant_id,
            self.restaurant.as_ref(),
        )
    }

    pub fn total_plates(&self) -> u64 {
        apportion::total_plates(&self.participants, &self.plate_selections)
    }

    pub fn totals(&self) -> RunningTotals {
        RunningTotals {
            plates: self.total_plates(),
            amount: apportion::aggregate_subtotal(
                &self.participants,
                &self.plate_selections,
                self.restaurant.as_ref(),
            ),
        }
    }

    pub fn bill(&self) -> Bill {
        Bill::compute(
            &self.participants,
            &self.plate_selections,
            self.restaurant.as_ref(),
        )
    }

    /// Currency settings of the restaurant, or the default baht format
    pub fn currency_format(&self) -> CurrencyFormat {
        self.restaurant
            .as_ref()
            .map(|r| r.currency_format.clone())
            .unwrap_or_default()
    }

    pub fn format_currency(&self, amount: Decimal) -> String {
        match &self.restaurant {
            Some(r) => money::format_currency(amount, &r.currency_format),
            None => money::format_currency(amount, &CurrencyFormat::default()),
        }
    }

    // ========================================================================
    // Snapshot
    // ========================================================================

    /// Copy of the session for persistence
    pub fn snapshot(&self) -> AppResult<SessionSnapshot> {
        let restaurant = self
            .restaurant
            .as_ref()
            .ok_or_else(|| AppError::new(ErrorCode::NoRestaurantSelected))?;

        Ok(SessionSnapshot::new(
            restaurant.id.clone(),
            self.participants.clone(),
            self.plate_selections.clone(),
        ))
    }

    /// Best-effort resume of a stored snapshot
    ///
    /// The restaurant must still be in the catalog. Participants with id 0
    /// or a repeated id are dropped (the first one wins), as are zero counts
    /// and selections of unknown participants. Counts are capped at
    /// [`MAX_PLATE_COUNT`]. An empty participant list falls back to the
    /// default single participant.
    pub fn restore(snapshot: &SessionSnapshot, catalog: &Catalog) -> AppResult<Self> {
        let restaurant = catalog
            .find(&snapshot.restaurant)
            .cloned()
            .ok_or_else(|| AppError::restaurant_not_found(&snapshot.restaurant))?;

        let mut seen = BTreeSet::new();
        let participants: Vec<Participant> = snapshot
            .participants
            .iter()
            .filter(|p| p.id > 0 && seen.insert(p.id))
            .cloned()
            .collect();
        if participants.len() != snapshot.participants.len() {
            tracing::warn!(
                dropped = snapshot.participants.len() - participants.len(),
                "Dropped participants with invalid or repeated ids"
            );
        }

        let mut session = Self::for_restaurant(restaurant);
        if participants.is_empty() {
            return Ok(session);
        }

        session.participants = participants;
        session.plate_selections = session
            .participants
            .iter()
            .map(|p| {
                let counts: PlateCounts = snapshot
                    .plate_selections
                    .get(&p.id)
                    .map(|c| {
                        c.iter()
                            .filter(|(_, count)| **count > 0)
                            .map(|(k, count)| (k.clone(), (*count).min(MAX_PLATE_COUNT)))
                            .collect()
                    })
                    .unwrap_or_default();
                (p.id, counts)
            })
            .collect();

        tracing::info!(
            restaurant = %snapshot.restaurant,
            participants = session.participants.len(),
            "Session restored"
        );
        Ok(session)
    }
}
