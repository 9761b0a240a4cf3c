//! Row mapping and insert payloads.
//!
//! This is the single boundary where loosely-typed SQLite rows become the
//! strongly-typed entities the rest of the workspace consumes. Malformed
//! text (bad timestamps, unknown fuel types) is rejected here as a
//! conversion failure instead of leaking partially-parsed records.

use std::str::FromStr;

use rusqlite::types::Type;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use carfuel_types::{FuelRecord, FuelType, ParseError, Vehicle};

use crate::error::Result;

/// Payload for inserting a fuel record; id and bookkeeping timestamps are
/// assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFuelRecord {
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
    /// Odometer reading in km.
    pub odometer: f64,
    /// Whether the tank was filled completely.
    pub full_tank: bool,
    /// Station name.
    pub station: Option<String>,
    /// Tire pressure was checked.
    pub checked_tires: bool,
    /// Oil level was checked.
    pub checked_oil: bool,
    /// A fuel additive was used.
    pub used_additive: bool,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Payload for inserting a vehicle; id and bookkeeping timestamps are
/// assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVehicle {
    /// Display name.
    pub nickname: String,
    /// Model description.
    pub model: String,
    /// Model year.
    pub year: i32,
    /// Color.
    pub color: String,
    /// Fuel type the vehicle runs on.
    pub fuel_type: FuelType,
    /// Tank capacity in liters.
    pub tank_capacity: f64,
}

/// Render a timestamp as the sortable RFC 3339 UTC text stored in the DB.
pub(crate) fn timestamp_to_text(ts: OffsetDateTime) -> Result<String> {
    Ok(ts.to_offset(time::UtcOffset::UTC).format(&Rfc3339)?)
}

/// Parse a stored timestamp column, rejecting malformed text.
fn timestamp_from_text(idx: usize, text: &str) -> rusqlite::Result<OffsetDateTime> {
    OffsetDateTime::parse(text, &Rfc3339).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(ParseError::InvalidTimestamp(text.to_string())),
        )
    })
}

/// Parse a stored fuel-type column, rejecting unknown values.
fn fuel_type_from_text(idx: usize, text: &str) -> rusqlite::Result<FuelType> {
    FuelType::from_str(text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Map a `vehicles` row (all columns, schema order) to a [`Vehicle`].
pub(crate) fn vehicle_from_row(row: &Row<'_>) -> rusqlite::Result<Vehicle> {
    Ok(Vehicle {
        id: row.get(0)?,
        nickname: row.get(1)?,
        model: row.get(2)?,
        year: row.get(3)?,
        color: row.get(4)?,
        fuel_type: fuel_type_from_text(5, &row.get::<_, String>(5)?)?,
        tank_capacity: row.get(6)?,
        active: row.get::<_, i64>(7)? != 0,
        created_at: timestamp_from_text(8, &row.get::<_, String>(8)?)?,
        updated_at: timestamp_from_text(9, &row.get::<_, String>(9)?)?,
    })
}

/// Map a `fuel_records` row (all columns, schema order) to a [`FuelRecord`].
pub(crate) fn record_from_row(row: &Row<'_>) -> rusqlite::Result<FuelRecord> {
    Ok(FuelRecord {
        id: row.get(0)?,
        vehicle_id: row.get(1)?,
        recorded_at: timestamp_from_text(2, &row.get::<_, String>(2)?)?,
        price_per_liter: row.get(3)?,
        liters: row.get(4)?,
        total_cost: row.get(5)?,
        fuel_type: fuel_type_from_text(6, &row.get::<_, String>(6)?)?,
        odometer: row.get(7)?,
        full_tank: row.get::<_, i64>(8)? != 0,
        station: row.get(9)?,
        checked_tires: row.get::<_, i64>(10)? != 0,
        checked_oil: row.get::<_, i64>(11)? != 0,
        used_additive: row.get::<_, i64>(12)? != 0,
        notes: row.get(13)?,
        created_at: timestamp_from_text(14, &row.get::<_, String>(14)?)?,
        updated_at: timestamp_from_text(15, &row.get::<_, String>(15)?)?,
    })
}
