//! Main store implementation.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use carfuel_types::{FuelRecord, Vehicle};

use crate::error::{Error, Result};
use crate::models::{
    record_from_row, timestamp_to_text, vehicle_from_row, NewFuelRecord, NewVehicle,
};
use crate::queries::RecordQuery;
use crate::schema;

const VEHICLE_COLUMNS: &str = "id, nickname, model, year, color, fuel_type, tank_capacity, \
     active, created_at, updated_at";

/// SQLite-based store for vehicles and fuel records.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        info!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;

        // Enable foreign keys and WAL mode for better performance
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        // Initialize schema
        schema::initialize(&conn)?;

        Ok(Self { conn })
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

// Vehicle operations
impl Store {
    /// Insert a new vehicle and return the stored entity.
    ///
    /// The first vehicle registered becomes the active one.
    pub fn insert_vehicle(&self, new: &NewVehicle) -> Result<Vehicle> {
        let id = Uuid::new_v4().to_string();
        let now = timestamp_to_text(OffsetDateTime::now_utc())?;

        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM vehicles", [], |row| row.get(0))?;
        let active = count == 0;

        self.conn.execute(
            "INSERT INTO vehicles (id, nickname, model, year, color, fuel_type,
             tank_capacity, active, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
            rusqlite::params![
                id,
                new.nickname,
                new.model,
                new.year,
                new.color,
                new.fuel_type.as_str(),
                new.tank_capacity,
                active as i64,
                now,
            ],
        )?;

        info!("Registered vehicle {} ({})", new.nickname, id);
        self.get_vehicle(&id)?.ok_or(Error::VehicleNotFound(id))
    }

    /// Update an existing vehicle's editable fields.
    ///
    /// Bumps `updated_at`; the active flag is managed through
    /// [`set_active_vehicle`](Store::set_active_vehicle) instead.
    pub fn update_vehicle(&self, vehicle: &Vehicle) -> Result<()> {
        let now = timestamp_to_text(OffsetDateTime::now_utc())?;

        let changed = self.conn.execute(
            "UPDATE vehicles SET nickname = ?2, model = ?3, year = ?4, color = ?5,
             fuel_type = ?6, tank_capacity = ?7, updated_at = ?8
             WHERE id = ?1",
            rusqlite::params![
                vehicle.id,
                vehicle.nickname,
                vehicle.model,
                vehicle.year,
                vehicle.color,
                vehicle.fuel_type.as_str(),
                vehicle.tank_capacity,
                now,
            ],
        )?;

        if changed == 0 {
            return Err(Error::VehicleNotFound(vehicle.id.clone()));
        }
        Ok(())
    }

    /// Get a vehicle by ID.
    pub fn get_vehicle(&self, id: &str) -> Result<Option<Vehicle>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = ?"))?;

        let vehicle = stmt.query_row([id], vehicle_from_row).optional()?;
        Ok(vehicle)
    }

    /// List all vehicles ordered by nickname.
    pub fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles ORDER BY nickname, id"
        ))?;

        let vehicles = stmt
            .query_map([], vehicle_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(vehicles)
    }

    /// Delete a vehicle and all of its fuel records.
    ///
    /// If the deleted vehicle was active, another vehicle is promoted.
    pub fn delete_vehicle(&self, id: &str) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute("DELETE FROM fuel_records WHERE vehicle_id = ?", [id])?;
        let changed = tx.execute("DELETE FROM vehicles WHERE id = ?", [id])?;
        if changed == 0 {
            return Err(Error::VehicleNotFound(id.to_string()));
        }

        tx.commit()?;
        info!("Deleted vehicle {}", id);

        self.ensure_active_vehicle()?;
        Ok(())
    }

    /// Get the currently active vehicle, if any.
    pub fn active_vehicle(&self) -> Result<Option<Vehicle>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE active = 1 LIMIT 1"
        ))?;

        let vehicle = stmt.query_row([], vehicle_from_row).optional()?;
        Ok(vehicle)
    }

    /// Make the given vehicle the single active one.
    ///
    /// Clearing the old flag and setting the new one happen in one
    /// transaction so at most one row ever carries active = 1.
    pub fn set_active_vehicle(&self, id: &str) -> Result<()> {
        let now = timestamp_to_text(OffsetDateTime::now_utc())?;
        let tx = self.conn.unchecked_transaction()?;

        tx.execute("UPDATE vehicles SET active = 0 WHERE active = 1", [])?;
        let changed = tx.execute(
            "UPDATE vehicles SET active = 1, updated_at = ?2 WHERE id = ?1",
            rusqlite::params![id, now],
        )?;
        if changed == 0 {
            return Err(Error::VehicleNotFound(id.to_string()));
        }

        tx.commit()?;
        debug!("Vehicle {} is now active", id);
        Ok(())
    }

    /// Ensure some vehicle is active and return it.
    ///
    /// When vehicles exist but none is flagged, the first by nickname is
    /// promoted. Returns `None` only when the store has no vehicles at all.
    pub fn ensure_active_vehicle(&self) -> Result<Option<Vehicle>> {
        if let Some(vehicle) = self.active_vehicle()? {
            return Ok(Some(vehicle));
        }

        let Some(first) = self.list_vehicles()?.into_iter().next() else {
            return Ok(None);
        };

        self.set_active_vehicle(&first.id)?;
        self.get_vehicle(&first.id)
    }
}

// Fuel record operations
impl Store {
    /// Insert a new fuel record and return the stored entity.
    pub fn insert_record(&self, new: &NewFuelRecord) -> Result<FuelRecord> {
        if self.get_vehicle(&new.vehicle_id)?.is_none() {
            return Err(Error::VehicleNotFound(new.vehicle_id.clone()));
        }

        let id = Uuid::new_v4().to_string();
        let now = timestamp_to_text(OffsetDateTime::now_utc())?;

        self.conn.execute(
            "INSERT INTO fuel_records (id, vehicle_id, recorded_at, price_per_liter,
             liters, total_cost, fuel_type, odometer, full_tank, station,
             checked_tires, checked_oil, used_additive, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?15)",
            rusqlite::params![
                id,
                new.vehicle_id,
                timestamp_to_text(new.recorded_at)?,
                new.price_per_liter,
                new.liters,
                new.total_cost,
                new.fuel_type.as_str(),
                new.odometer,
                new.full_tank as i64,
                new.station,
                new.checked_tires as i64,
                new.checked_oil as i64,
                new.used_additive as i64,
                new.notes,
                now,
            ],
        )?;

        debug!("Inserted fuel record {} for vehicle {}", id, new.vehicle_id);
        self.get_record(&id)?.ok_or(Error::RecordNotFound(id))
    }

    /// Update an existing fuel record. Bumps `updated_at`.
    pub fn update_record(&self, record: &FuelRecord) -> Result<()> {
        let now = timestamp_to_text(OffsetDateTime::now_utc())?;

        let changed = self.conn.execute(
            "UPDATE fuel_records SET recorded_at = ?2, price_per_liter = ?3, liters = ?4,
             total_cost = ?5, fuel_type = ?6, odometer = ?7, full_tank = ?8, station = ?9,
             checked_tires = ?10, checked_oil = ?11, used_additive = ?12, notes = ?13,
             updated_at = ?14
             WHERE id = ?1",
            rusqlite::params![
                record.id,
                timestamp_to_text(record.recorded_at)?,
                record.price_per_liter,
                record.liters,
                record.total_cost,
                record.fuel_type.as_str(),
                record.odometer,
                record.full_tank as i64,
                record.station,
                record.checked_tires as i64,
                record.checked_oil as i64,
                record.used_additive as i64,
                record.notes,
                now,
            ],
        )?;

        if changed == 0 {
            return Err(Error::RecordNotFound(record.id.clone()));
        }
        Ok(())
    }

    /// Get a fuel record by ID.
    pub fn get_record(&self, id: &str) -> Result<Option<FuelRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, vehicle_id, recorded_at, price_per_liter, liters, total_cost,
             fuel_type, odometer, full_tank, station, checked_tires, checked_oil,
             used_additive, notes, created_at, updated_at
             FROM fuel_records WHERE id = ?",
        )?;

        let record = stmt.query_row([id], record_from_row).optional()?;
        Ok(record)
    }

    /// Delete a fuel record by ID.
    pub fn delete_record(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM fuel_records WHERE id = ?", [id])?;
        if changed == 0 {
            return Err(Error::RecordNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Query fuel records with filters.
    pub fn query_records(&self, query: &RecordQuery) -> Result<Vec<FuelRecord>> {
        let sql = query.build_sql()?;
        let (_, params) = query.build_where()?;

        debug!("Executing query: {}", sql);

        let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params_ref.as_slice(), record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Count fuel records, optionally scoped to a vehicle.
    pub fn count_records(&self, vehicle_id: Option<&str>) -> Result<u64> {
        let count: i64 = match vehicle_id {
            Some(id) => self.conn.query_row(
                "SELECT COUNT(*) FROM fuel_records WHERE vehicle_id = ?",
                [id],
                |row| row.get(0),
            )?,
            None => self
                .conn
                .query_row("SELECT COUNT(*) FROM fuel_records", [], |row| row.get(0))?,
        };

        Ok(count as u64)
    }
}
