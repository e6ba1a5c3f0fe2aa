//! Bill summary
//!
//! Report data for the summary page: per-participant rows, labelled charge
//! rows, and a breakdown of plates by type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{PlateSelections, Restaurant};

use crate::apportion::{Bill, ParticipantShare, TaxBreakdown};
use crate::billing::BillingSession;
use crate::money::{format_rate, to_decimal};

/// Plates of one type across the whole table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateBreakdownRow {
    pub plate_key: String,
    pub label: String,
    pub unit_price: Decimal,
    pub count: u64,
    pub total: Decimal,
}

/// Plate rows sorted by unit price, most expensive first, plus the totals row
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateBreakdown {
    pub rows: Vec<PlateBreakdownRow>,
    pub total_count: u64,
    pub total_price: Decimal,
}

impl PlateBreakdown {
    /// Sum counts per plate key over every participant
    ///
    /// Keys the restaurant does not list are left out.
    pub fn compute(selections: &PlateSelections, restaurant: Option<&Restaurant>) -> Self {
        let Some(restaurant) = restaurant else {
            return Self::default();
        };

        let mut rows: Vec<PlateBreakdownRow> = restaurant
            .plates
            .iter()
            .filter_map(|(key, plate)| {
                let count: u64 = selections
                    .values()
                    .filter_map(|counts| counts.get(key))
                    .map(|&c| u64::from(c))
                    .sum();
                if count == 0 {
                    return None;
                }
                let unit_price = to_decimal(plate.price);
                Some(PlateBreakdownRow {
                    plate_key: key.clone(),
                    label: plate.display_label(key).to_string(),
                    unit_price,
                    count,
                    total: unit_price * Decimal::from(count),
                })
            })
            .collect();

        // Stable for equal prices: plates iterate in key order
        rows.sort_by(|a, b| b.unit_price.cmp(&a.unit_price));

        Self {
            total_count: rows.iter().map(|r| r.count).sum(),
            total_price: rows.iter().map(|r| r.total).sum(),
            rows,
        }
    }
}

/// Labelled amount under the participant table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRow {
    pub label: String,
    pub amount: Decimal,
}

/// Everything the summary page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub total_plates: u64,
    pub participants: Vec<ParticipantShare>,
    pub tax: TaxBreakdown,
    pub charges: Vec<ChargeRow>,
    pub plate_breakdown: PlateBreakdown,
    pub grand_total: Decimal,
}

impl BillSummary {
    /// Build the summary of a session
    ///
    /// Fails with `NoRestaurantSelected` without a restaurant and with
    /// `NoPlatesSelected` when the table has not taken any plate.
    pub fn build(session: &BillingSession) -> AppResult<Self> {
        let restaurant = session
            .restaurant()
            .ok_or_else(|| AppError::new(ErrorCode::NoRestaurantSelected))?;

        let total_plates = session.total_plates();
        if total_plates == 0 {
            return Err(AppError::new(ErrorCode::NoPlatesSelected));
        }

        let Bill { tax, shares } = session.bill();

        Ok(Self {
            restaurant_id: restaurant.id.clone(),
            restaurant_name: restaurant.name.clone(),
            total_plates,
            participants: shares,
            charges: charge_rows(restaurant, &tax),
            plate_breakdown: PlateBreakdown::compute(
                session.plate_selections(),
                Some(restaurant),
            ),
            grand_total: tax.grand_total,
            tax,
        })
    }
}

fn charge_rows(restaurant: &Restaurant, tax: &TaxBreakdown) -> Vec<ChargeRow> {
    let mut rows = vec![
        ChargeRow {
            label: "Subtotal".to_string(),
            amount: tax.subtotal,
        },
        ChargeRow {
            label: format!(
                "Service Charge ({})",
                format_rate(restaurant.service_charge_rate)
            ),
            amount: tax.service_charge,
        },
        ChargeRow {
            label: format!("VAT ({})", format_rate(restaurant.vat_rate)),
            amount: tax.vat_amount,
        },
    ];
    if tax.vat_included {
        rows.push(ChargeRow {
            label: "Net Amount".to_string(),
            amount: tax.net_amount,
        });
    }
    rows
}
