//! Vehicle command - manage the garage.

use anyhow::Result;
use carfuel_store::{NewVehicle, Store};
use carfuel_types::FuelType;

use crate::cli::VehicleAction;
use crate::format::{format_vehicles_text, FormatOptions};

use super::resolve_vehicle;

/// Execute the vehicle command.
pub fn cmd_vehicle(store: &Store, action: VehicleAction, opts: FormatOptions) -> Result<()> {
    match action {
        VehicleAction::Add {
            nickname,
            model,
            year,
            color,
            fuel_type,
            tank_capacity,
        } => add_vehicle(store, nickname, model, year, color, fuel_type, tank_capacity),
        VehicleAction::List => list_vehicles(store, opts),
        VehicleAction::Use { vehicle } => use_vehicle(store, vehicle),
        VehicleAction::Remove { vehicle, yes } => remove_vehicle(store, vehicle, yes),
    }
}

fn add_vehicle(
    store: &Store,
    nickname: String,
    model: String,
    year: i32,
    color: String,
    fuel_type: FuelType,
    tank_capacity: f64,
) -> Result<()> {
    if tank_capacity <= 0.0 {
        anyhow::bail!("Tank capacity must be positive, got {}", tank_capacity);
    }

    let vehicle = store.insert_vehicle(&NewVehicle {
        nickname,
        model,
        year,
        color,
        fuel_type,
        tank_capacity,
    })?;

    println!("Registered {} ({})", vehicle.nickname, vehicle.id);
    if vehicle.active {
        println!("It is now the active vehicle.");
    }
    Ok(())
}

fn list_vehicles(store: &Store, opts: FormatOptions) -> Result<()> {
    let vehicles = store.list_vehicles()?;

    if vehicles.is_empty() {
        println!("No vehicles registered. Run 'carfuel vehicle add' first.");
        return Ok(());
    }

    print!("{}", format_vehicles_text(&vehicles, &opts));
    Ok(())
}

fn use_vehicle(store: &Store, selector: String) -> Result<()> {
    let vehicle = resolve_vehicle(store, Some(selector))?;
    store.set_active_vehicle(&vehicle.id)?;
    println!("{} is now the active vehicle.", vehicle.nickname);
    Ok(())
}

fn remove_vehicle(store: &Store, selector: String, yes: bool) -> Result<()> {
    let vehicle = resolve_vehicle(store, Some(selector))?;
    let records = store.count_records(Some(&vehicle.id))?;

    if !yes {
        anyhow::bail!(
            "Removing {} would delete {} fuel record(s). Pass --yes to confirm.",
            vehicle.nickname,
            records
        );
    }

    store.delete_vehicle(&vehicle.id)?;
    println!(
        "Removed {} and {} fuel record(s).",
        vehicle.nickname, records
    );
    Ok(())
}
