//! Core types for fuel purchase tracking.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{ParseError, ParseResult};

/// Fuel type a vehicle runs on (and that a purchase was made with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    /// Gasoline / petrol.
    Gasoline,
    /// Ethanol (hydrated alcohol).
    Ethanol,
    /// Flex-fuel (gasoline or ethanol in any mix).
    Flex,
    /// Diesel.
    Diesel,
}

impl FuelType {
    /// Stable lowercase name, used for storage and CLI values.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "gasoline",
            FuelType::Ethanol => "ethanol",
            FuelType::Flex => "flex",
            FuelType::Diesel => "diesel",
        }
    }
}

impl FromStr for FuelType {
    type Err = ParseError;

    fn from_str(s: &str) -> ParseResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gasoline" => Ok(FuelType::Gasoline),
            "ethanol" => Ok(FuelType::Ethanol),
            "flex" => Ok(FuelType::Flex),
            "diesel" => Ok(FuelType::Diesel),
            _ => Err(ParseError::UnknownFuelType(s.to_string())),
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single fuel purchase event.
///
/// Records are totally ordered by `recorded_at`, with ties broken by `id`
/// so that sorting is deterministic. The three money/volume fields are
/// stored independently; `total_cost` is expected to be roughly
/// `price_per_liter * liters` but small rounding drift from manual entry
/// is tolerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelRecord {
    /// Opaque unique identifier (UUID v4).
    pub id: String,
    /// Owning vehicle.
    pub vehicle_id: String,
    /// When the purchase happened.
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
    /// Price paid per liter.
    pub price_per_liter: f64,
    /// Liters purchased.
    pub liters: f64,
    /// Total amount paid.
    pub total_cost: f64,
    /// Fuel type of this purchase.
    pub fuel_type: FuelType,
    /// Odometer reading at purchase time, in km.
    pub odometer: f64,
    /// Whether the tank was filled completely. Full-tank records anchor
    /// consumption intervals; partial fills only contribute volume/cost.
    pub full_tank: bool,
    /// Station name, for display only.
    pub station: Option<String>,
    /// Tire pressure was checked during this stop.
    pub checked_tires: bool,
    /// Oil level was checked during this stop.
    pub checked_oil: bool,
    /// A fuel additive was used.
    pub used_additive: bool,
    /// Free-text notes, for display only.
    pub notes: Option<String>,
    /// When the record was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the record was last modified.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A vehicle that fuel records belong to.
///
/// At most one vehicle is marked `active` at any time; all record
/// operations are scoped to the active vehicle unless told otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Opaque unique identifier (UUID v4).
    pub id: String,
    /// Display name ("my red corolla").
    pub nickname: String,
    /// Model description.
    pub model: String,
    /// Model year.
    pub year: i32,
    /// Color, for display only.
    pub color: String,
    /// Fuel type the vehicle runs on.
    pub fuel_type: FuelType,
    /// Tank capacity in liters.
    pub tank_capacity: f64,
    /// Whether this is the currently selected vehicle.
    pub active: bool,
    /// When the vehicle was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the vehicle was last modified.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
