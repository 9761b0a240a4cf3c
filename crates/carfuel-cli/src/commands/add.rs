//! Add command - record a fuel purchase.

use anyhow::Result;
use time::OffsetDateTime;

use carfuel_core::{resolve_fill, validate_new_record};
use carfuel_store::{NewFuelRecord, RecordQuery, Store};
use carfuel_types::FuelRecord;

use crate::cli::AddArgs;
use crate::config::Config;
use crate::format::parse_datetime;

use super::resolve_vehicle;

/// Execute the add command.
pub fn cmd_add(store: &Store, args: AddArgs, config: &Config) -> Result<()> {
    let vehicle = resolve_vehicle(store, args.vehicle.clone())?;

    let Some(fill) = resolve_fill(args.price, args.liters, args.total) else {
        anyhow::bail!("Provide at least two of --price, --liters and --total");
    };

    let recorded_at = match args.date.as_deref() {
        Some(s) => parse_datetime(s)?,
        None => OffsetDateTime::now_utc(),
    };

    let new = NewFuelRecord {
        vehicle_id: vehicle.id.clone(),
        recorded_at,
        price_per_liter: fill.price_per_liter,
        liters: fill.liters,
        total_cost: fill.total_cost,
        fuel_type: args.fuel_type.unwrap_or(vehicle.fuel_type),
        odometer: args.odometer,
        full_tank: !args.partial,
        station: args.station.clone().or_else(|| config.station.clone()),
        checked_tires: args.tires,
        checked_oil: args.oil,
        used_additive: args.additive,
        notes: args.notes.clone(),
    };

    let existing = store.query_records(&RecordQuery::new().vehicle(&vehicle.id))?;
    let validation = validate_new_record(&existing, &candidate_for(&new));

    if validation.has_warnings() {
        for warning in &validation.warnings {
            eprintln!("Warning: {}", warning);
        }
        if !args.force {
            anyhow::bail!("Record looks suspicious. Pass --force to save it anyway.");
        }
    }

    let record = store.insert_record(&new)?;
    println!(
        "Recorded {:.2} L at {:.2}/L ({:.2} total) for {}",
        record.liters, record.price_per_liter, record.total_cost, vehicle.nickname
    );
    Ok(())
}

/// Build a transient record so the candidate can be validated before it
/// gets an id and bookkeeping timestamps.
fn candidate_for(new: &NewFuelRecord) -> FuelRecord {
    FuelRecord {
        id: String::new(),
        vehicle_id: new.vehicle_id.clone(),
        recorded_at: new.recorded_at,
        price_per_liter: new.price_per_liter,
        liters: new.liters,
        total_cost: new.total_cost,
        fuel_type: new.fuel_type,
        odometer: new.odometer,
        full_tank: new.full_tank,
        station: new.station.clone(),
        checked_tires: new.checked_tires,
        checked_oil: new.checked_oil,
        used_additive: new.used_additive,
        notes: new.notes.clone(),
        created_at: new.recorded_at,
        updated_at: new.recorded_at,
    }
}
