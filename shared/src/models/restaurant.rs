//! Restaurant Model
//!
//! One catalog document per restaurant. Field names follow the camelCase keys
//! of the shipped JSON files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};

/// Largest decimal digit count accepted for currency display
pub const MAX_CURRENCY_DECIMAL_DIGITS: u32 = 8;
/// Maximum allowed plate price
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed service charge or VAT rate (100%)
pub const MAX_RATE: f64 = 1.0;

/// Where the currency symbol goes relative to the amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyPosition {
    #[default]
    Before,
    After,
}

/// Plate type (color-coded dish) offered by a restaurant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    #[serde(default)]
    pub label_th: Option<String>,
    #[serde(default)]
    pub label_en: Option<String>,
    /// Unit price, non-negative
    pub price: f64,
}

impl Plate {
    /// Label shown to diners; falls back to the plate key
    pub fn display_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.label_th
            .as_deref()
            .or(self.label_en.as_deref())
            .unwrap_or(key)
    }
}

/// Currency display settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyFormat {
    #[serde(rename = "currencySymbol")]
    pub symbol: String,
    #[serde(rename = "currencyPosition", default)]
    pub position: CurrencyPosition,
    #[serde(rename = "currencyDecimalDigits", default = "default_decimal_digits")]
    pub decimal_digits: u32,
    #[serde(rename = "currencyDecimalSeparator", default = "default_decimal_separator")]
    pub decimal_separator: String,
    #[serde(
        rename = "currencyThousandsSeparator",
        default = "default_thousands_separator"
    )]
    pub thousands_separator: String,
}

fn default_decimal_digits() -> u32 {
    2
}

fn default_decimal_separator() -> String {
    ".".to_string()
}

fn default_thousands_separator() -> String {
    ",".to_string()
}

impl Default for CurrencyFormat {
    /// Used when no restaurant is selected
    fn default() -> Self {
        Self {
            symbol: "฿".to_string(),
            position: CurrencyPosition::Before,
            decimal_digits: default_decimal_digits(),
            decimal_separator: default_decimal_separator(),
            thousands_separator: default_thousands_separator(),
        }
    }
}

/// Restaurant entity (immutable once loaded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[serde(rename = "restaurantId")]
    pub id: String,
    #[serde(rename = "restaurantName")]
    pub name: String,
    #[serde(rename = "restaurantDescription", default)]
    pub description: String,
    #[serde(rename = "restaurantLogo", default)]
    pub logo: Option<String>,
    /// Service charge as a fraction (0.10 = 10%)
    #[serde(rename = "serviceCharge")]
    pub service_charge_rate: f64,
    /// VAT as a fraction (0.07 = 7%)
    #[serde(rename = "vat")]
    pub vat_rate: f64,
    /// Listed plate prices already contain VAT
    pub vat_included: bool,
    /// ISO currency code, informational only
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(flatten)]
    pub currency_format: CurrencyFormat,
    pub plates: BTreeMap<String, Plate>,
}

impl Restaurant {
    /// Plate lookup; unknown keys yield `None`
    pub fn plate(&self, key: &str) -> Option<&Plate> {
        self.plates.get(key)
    }

    /// Reject records the engine cannot price
    pub fn validate(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::invalid_restaurant(
                "",
                "restaurantId must not be empty",
            ));
        }

        require_rate(&self.id, self.service_charge_rate, "serviceCharge")?;
        require_rate(&self.id, self.vat_rate, "vat")?;

        if self.currency_format.decimal_digits > MAX_CURRENCY_DECIMAL_DIGITS {
            return Err(AppError::invalid_restaurant(
                &self.id,
                format!(
                    "currencyDecimalDigits exceeds maximum allowed ({}), got {}",
                    MAX_CURRENCY_DECIMAL_DIGITS, self.currency_format.decimal_digits
                ),
            ));
        }

        for (key, plate) in &self.plates {
            if !plate.price.is_finite() || plate.price < 0.0 {
                return Err(AppError::invalid_restaurant(
                    &self.id,
                    format!(
                        "plate '{}' price must be a non-negative number, got {}",
                        key, plate.price
                    ),
                )
                .with_detail("plate", key.as_str()));
            }
            if plate.price > MAX_PRICE {
                return Err(AppError::invalid_restaurant(
                    &self.id,
                    format!(
                        "plate '{}' price exceeds maximum allowed ({}), got {}",
                        key, MAX_PRICE, plate.price
                    ),
                )
                .with_detail("plate", key.as_str()));
            }
        }

        Ok(())
    }
}

fn require_rate(id: &str, value: f64, field_name: &str) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::invalid_restaurant(
            id,
            format!("{} must be a non-negative number, got {}", field_name, value),
        )
        .with_detail("field", field_name));
    }
    if value > MAX_RATE {
        return Err(AppError::invalid_restaurant(
            id,
            format!(
                "{} exceeds maximum allowed ({}), got {}",
                field_name, MAX_RATE, value
            ),
        )
        .with_detail("field", field_name));
    }
    Ok(())
}
