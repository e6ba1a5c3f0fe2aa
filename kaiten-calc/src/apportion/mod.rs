//! Bill apportionment
//!
//! Pure functions over a plate-selection map and a restaurant:
//! - per-participant plate counts and subtotals
//! - service charge and VAT for the whole table (VAT-included or added on top)
//! - proportional split of the shared charges across participants
//!
//! Nothing here fails. Missing participants, unknown plate keys, an absent
//! restaurant or an empty table all degrade to zero amounts, so callers never
//! need to guard a lookup before asking for a total. Arithmetic is checked:
//! an overflow is logged at error and the affected amount becomes zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{Participant, ParticipantId, PlateSelections, Restaurant};

use crate::money::{checked_sum, to_decimal};

/// Number of plates a participant has taken; 0 when they have no entry
pub fn participant_plates(selections: &PlateSelections, participant_id: ParticipantId) -> u64 {
    selections
        .get(&participant_id)
        .map(|counts| counts.values().map(|&c| u64::from(c)).sum())
        .unwrap_or(0)
}

/// Sum of `count × price` for a participant's plates
///
/// Plate keys the restaurant does not list contribute nothing. Without a
/// restaurant every amount is zero.
pub fn participant_amount(
    selections: &PlateSelections,
    participant_id: ParticipantId,
    restaurant: Option<&Restaurant>,
) -> Decimal {
    let (Some(restaurant), Some(counts)) = (restaurant, selections.get(&participant_id)) else {
        return Decimal::ZERO;
    };

    let lines = counts.iter().filter_map(|(key, &count)| {
        restaurant
            .plate(key)
            .map(|plate| to_decimal(plate.price).checked_mul(Decimal::from(count)))
    });
    lines
        .collect::<Option<Vec<Decimal>>>()
        .and_then(checked_sum)
        .unwrap_or_else(|| {
            tracing::error!(participant_id, "Participant amount overflowed, defaulting to zero");
            Decimal::ZERO
        })
}

/// Plates taken by the whole table
pub fn total_plates(participants: &[Participant], selections: &PlateSelections) -> u64 {
    participants
        .iter()
        .map(|p| participant_plates(selections, p.id))
        .sum()
}

/// Sum of every participant's amount, before service charge and VAT
pub fn aggregate_subtotal(
    participants: &[Participant],
    selections: &PlateSelections,
    restaurant: Option<&Restaurant>,
) -> Decimal {
    sum_or_zero(
        participants
            .iter()
            .map(|p| participant_amount(selections, p.id, restaurant)),
    )
}

fn sum_or_zero(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    checked_sum(amounts).unwrap_or_else(|| {
        tracing::error!("Table subtotal overflowed, defaulting to zero");
        Decimal::ZERO
    })
}

/// Tax configuration of a restaurant in decimal form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaxRates {
    pub service_charge_rate: Decimal,
    pub vat_rate: Decimal,
    pub vat_included: bool,
}

impl TaxRates {
    pub fn new(service_charge_rate: Decimal, vat_rate: Decimal, vat_included: bool) -> Self {
        Self {
            service_charge_rate,
            vat_rate,
            vat_included,
        }
    }

    /// Rates of a restaurant; no restaurant means no charges at all
    pub fn for_restaurant(restaurant: Option<&Restaurant>) -> Self {
        restaurant
            .map(|r| Self {
                service_charge_rate: to_decimal(r.service_charge_rate),
                vat_rate: to_decimal(r.vat_rate),
                vat_included: r.vat_included,
            })
            .unwrap_or_default()
    }
}

/// Table-level charges
///
/// Amounts are kept at full precision. Round only for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub subtotal: Decimal,
    pub service_charge: Decimal,
    /// Subtotal plus service charge
    pub total_with_service: Decimal,
    pub vat_amount: Decimal,
    /// Amount before VAT: extracted when VAT is included, the subtotal otherwise
    pub net_amount: Decimal,
    pub grand_total: Decimal,
    pub vat_included: bool,
}

impl TaxBreakdown {
    /// Service charge and VAT for a subtotal
    ///
    /// - VAT included: VAT is extracted from `subtotal + service`, which is
    ///   also the grand total.
    /// - VAT excluded: VAT is `subtotal × rate` and is added on top.
    pub fn compute(subtotal: Decimal, rates: &TaxRates) -> Self {
        if subtotal.is_zero() {
            return Self {
                vat_included: rates.vat_included,
                ..Self::default()
            };
        }

        Self::try_compute(subtotal, rates).unwrap_or_else(|| {
            tracing::error!(%subtotal, "Tax breakdown overflowed, defaulting to zero");
            Self {
                vat_included: rates.vat_included,
                ..Self::default()
            }
        })
    }

    fn try_compute(subtotal: Decimal, rates: &TaxRates) -> Option<Self> {
        let service_charge = subtotal.checked_mul(rates.service_charge_rate)?;
        let total_with_service = subtotal.checked_add(service_charge)?;

        if rates.vat_included {
            let divisor = Decimal::ONE.checked_add(rates.vat_rate)?;
            let net_amount = if divisor.is_zero() {
                total_with_service
            } else {
                total_with_service.checked_div(divisor)?
            };
            Some(Self {
                subtotal,
                service_charge,
                total_with_service,
                vat_amount: total_with_service.checked_sub(net_amount)?,
                net_amount,
                grand_total: total_with_service,
                vat_included: true,
            })
        } else {
            let vat_amount = subtotal.checked_mul(rates.vat_rate)?;
            Some(Self {
                subtotal,
                service_charge,
                total_with_service,
                vat_amount,
                net_amount: subtotal,
                grand_total: total_with_service.checked_add(vat_amount)?,
                vat_included: false,
            })
        }
    }

    /// This participant's fraction of a shared amount
    ///
    /// Proportional to their subtotal; zero when the table subtotal is zero.
    /// Multiplies first for precision and divides first when the product
    /// would overflow.
    fn share_of(&self, participant_subtotal: Decimal, amount: Decimal) -> Decimal {
        if self.subtotal.is_zero() {
            return Decimal::ZERO;
        }
        if participant_subtotal == self.subtotal {
            return amount;
        }

        participant_subtotal
            .checked_mul(amount)
            .and_then(|product| product.checked_div(self.subtotal))
            .or_else(|| {
                participant_subtotal
                    .checked_div(self.subtotal)
                    .and_then(|ratio| ratio.checked_mul(amount))
            })
            .unwrap_or_else(|| {
                tracing::error!(
                    %participant_subtotal,
                    %amount,
                    "Share overflowed, defaulting to zero"
                );
                Decimal::ZERO
            })
    }

    /// Split the service charge and VAT for one participant
    pub fn participant_share(
        &self,
        participant: &Participant,
        plates: u64,
        subtotal: Decimal,
    ) -> ParticipantShare {
        let service_charge = self.share_of(subtotal, self.service_charge);
        let vat = self.share_of(subtotal, self.vat_amount);
        let with_service = subtotal.checked_add(service_charge);
        let total = if self.vat_included {
            with_service
        } else {
            with_service.and_then(|t| t.checked_add(vat))
        }
        .unwrap_or_else(|| {
            tracing::error!(
                participant_id = participant.id,
                "Participant total overflowed, defaulting to zero"
            );
            Decimal::ZERO
        });

        ParticipantShare {
            participant_id: participant.id,
            name: participant.name.clone(),
            plates,
            subtotal,
            service_charge,
            vat,
            total,
        }
    }
}

/// One participant's part of the bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantShare {
    pub participant_id: ParticipantId,
    pub name: String,
    pub plates: u64,
    pub subtotal: Decimal,
    pub service_charge: Decimal,
    /// VAT attributed to this participant; already inside `subtotal` when
    /// prices include VAT
    pub vat: Decimal,
    pub total: Decimal,
}

/// Charges for the table plus each participant's share
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub tax: TaxBreakdown,
    /// In participant order
    pub shares: Vec<ParticipantShare>,
}

impl Bill {
    /// Apportion the bill for a table
    pub fn compute(
        participants: &[Participant],
        selections: &PlateSelections,
        restaurant: Option<&Restaurant>,
    ) -> Self {
        let amounts: Vec<(u64, Decimal)> = participants
            .iter()
            .map(|p| {
                (
                    participant_plates(selections, p.id),
                    participant_amount(selections, p.id, restaurant),
                )
            })
            .collect();

        let subtotal = sum_or_zero(amounts.iter().map(|(_, amount)| *amount));
        let tax = TaxBreakdown::compute(subtotal, &TaxRates::for_restaurant(restaurant));

        let shares = participants
            .iter()
            .zip(amounts)
            .map(|(p, (plates, amount))| tax.participant_share(p, plates, amount))
            .collect();

        Self { tax, shares }
    }

    /// Sum of participant totals; equals the grand total within rounding
    pub fn shares_total(&self) -> Decimal {
        sum_or_zero(self.shares.iter().map(|s| s.total))
    }

    pub fn total_plates(&self) -> u64 {
        self.shares.iter().map(|s| s.plates).sum()
    }

    pub fn share_for(&self, participant_id: ParticipantId) -> Option<&ParticipantShare> {
        self.shares
            .iter()
            .find(|s| s.participant_id == participant_id)
    }
}

#[cfg(test)]
mod tests;
