//! Whole-database JSON backup export and import.
//!
//! A backup captures every vehicle and fuel record together with the schema
//! version that produced it. Import replaces the database contents wholesale
//! inside a single transaction, so a failed restore leaves the previous data
//! untouched.

use rusqlite::Transaction;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use carfuel_types::{FuelRecord, Vehicle};

use crate::error::{Error, Result};
use crate::models::timestamp_to_text;
use crate::schema::SCHEMA_VERSION;
use crate::store::Store;

/// A complete, versioned snapshot of the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backup {
    /// Schema version of the database that produced this backup.
    pub schema_version: i32,
    /// When the backup was taken.
    #[serde(with = "time::serde::rfc3339")]
    pub exported_at: OffsetDateTime,
    /// Names of the tables included in `data`.
    pub tables: Vec<String>,
    /// The snapshot payload.
    pub data: BackupData,
}

/// The table contents of a [`Backup`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupData {
    /// All vehicles, active flags included.
    pub vehicles: Vec<Vehicle>,
    /// All fuel records.
    pub fuel_records: Vec<FuelRecord>,
}

/// Row counts restored by a successful import.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Vehicles restored.
    pub vehicles: usize,
    /// Fuel records restored.
    pub fuel_records: usize,
}

impl Backup {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Store {
    /// Export the entire database as a [`Backup`].
    pub fn export_backup(&self) -> Result<Backup> {
        let vehicles = self.list_vehicles()?;
        let fuel_records = self.query_records(&crate::RecordQuery::new().oldest_first())?;

        info!(
            "Exporting backup: {} vehicles, {} fuel records",
            vehicles.len(),
            fuel_records.len()
        );

        Ok(Backup {
            schema_version: SCHEMA_VERSION,
            exported_at: OffsetDateTime::now_utc(),
            tables: vec!["vehicles".to_string(), "fuel_records".to_string()],
            data: BackupData {
                vehicles,
                fuel_records,
            },
        })
    }

    /// Replace the database contents with the given backup.
    ///
    /// Backups from a newer schema than this build supports are rejected
    /// unless `force` is set. Older backups are accepted; their rows pass
    /// through the current schema unchanged. The wipe and the reload run in
    /// one transaction, so on any failure the previous contents survive.
    pub fn import_backup(&self, backup: &Backup, force: bool) -> Result<ImportSummary> {
        if backup.schema_version > SCHEMA_VERSION && !force {
            return Err(Error::BackupVersionNewer {
                backup: backup.schema_version,
                current: SCHEMA_VERSION,
            });
        }

        let tx = self.connection().unchecked_transaction()?;

        tx.execute("DELETE FROM fuel_records", [])?;
        tx.execute("DELETE FROM vehicles", [])?;

        for vehicle in &backup.data.vehicles {
            insert_vehicle_row(&tx, vehicle)?;
        }
        for record in &backup.data.fuel_records {
            insert_record_row(&tx, record)?;
        }

        tx.commit()?;

        info!(
            "Imported backup from {}: {} vehicles, {} fuel records",
            backup.exported_at,
            backup.data.vehicles.len(),
            backup.data.fuel_records.len()
        );

        // A hand-edited backup may carry zero or several active flags
        self.ensure_active_vehicle()?;

        Ok(ImportSummary {
            vehicles: backup.data.vehicles.len(),
            fuel_records: backup.data.fuel_records.len(),
        })
    }
}

/// Insert a vehicle row verbatim, preserving id, flags and timestamps.
fn insert_vehicle_row(tx: &Transaction<'_>, vehicle: &Vehicle) -> Result<()> {
    tx.execute(
        "INSERT INTO vehicles (id, nickname, model, year, color, fuel_type,
         tank_capacity, active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        rusqlite::params![
            vehicle.id,
            vehicle.nickname,
            vehicle.model,
            vehicle.year,
            vehicle.color,
            vehicle.fuel_type.as_str(),
            vehicle.tank_capacity,
            vehicle.active as i64,
            timestamp_to_text(vehicle.created_at)?,
            timestamp_to_text(vehicle.updated_at)?,
        ],
    )?;
    Ok(())
}

/// Insert a fuel record row verbatim, preserving id and timestamps.
fn insert_record_row(tx: &Transaction<'_>, record: &FuelRecord) -> Result<()> {
    tx.execute(
        "INSERT INTO fuel_records (id, vehicle_id, recorded_at, price_per_liter,
         liters, total_cost, fuel_type, odometer, full_tank, station,
         checked_tires, checked_oil, used_additive, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        rusqlite::params![
            record.id,
            record.vehicle_id,
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
            timestamp_to_text(record.created_at)?,
            timestamp_to_text(record.updated_at)?,
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewFuelRecord, NewVehicle};
    use carfuel_types::FuelType;
    use time::macros::datetime;

    fn seeded_store() -> Store {
        let store = Store::open_in_memory().unwrap();
        let vehicle = store
            .insert_vehicle(&NewVehicle {
                nickname: "Daily".to_string(),
                model: "Fiat Argo 1.0".to_string(),
                year: 2022,
                color: "Silver".to_string(),
                fuel_type: FuelType::Flex,
                tank_capacity: 48.0,
            })
            .unwrap();

        for (day, km) in [(1, 45_000.0), (12, 45_430.0)] {
            store
                .insert_record(&NewFuelRecord {
                    vehicle_id: vehicle.id.clone(),
                    recorded_at: datetime!(2025-03-01 08:00 UTC) + time::Duration::days(day),
                    price_per_liter: 5.89,
                    liters: 38.0,
                    total_cost: 223.82,
                    fuel_type: FuelType::Gasoline,
                    odometer: km,
                    full_tank: true,
                    station: None,
                    checked_tires: false,
                    checked_oil: false,
                    used_additive: false,
                    notes: None,
                })
                .unwrap();
        }

        store
    }

    #[test]
    fn test_backup_round_trip() {
        let source = seeded_store();
        let backup = source.export_backup().unwrap();

        assert_eq!(backup.schema_version, SCHEMA_VERSION);
        assert_eq!(backup.tables, ["vehicles", "fuel_records"]);

        let json = backup.to_json().unwrap();
        let parsed = Backup::from_json(&json).unwrap();

        let target = Store::open_in_memory().unwrap();
        let summary = target.import_backup(&parsed, false).unwrap();
        assert_eq!(summary.vehicles, 1);
        assert_eq!(summary.fuel_records, 2);

        // Ids, timestamps and the active flag must survive verbatim
        let original = source.list_vehicles().unwrap();
        let restored = target.list_vehicles().unwrap();
        assert_eq!(restored[0].id, original[0].id);
        assert_eq!(restored[0].created_at, original[0].created_at);
        assert!(restored[0].active);

        let records = target
            .query_records(&crate::RecordQuery::new().oldest_first())
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].odometer, 45_000.0);
    }

    #[test]
    fn test_import_replaces_existing_data() {
        let source = seeded_store();
        let backup = source.export_backup().unwrap();

        let target = seeded_store();
        target.import_backup(&backup, false).unwrap();

        // Only the backup's rows remain
        assert_eq!(target.count_records(None).unwrap(), 2);
        assert_eq!(target.list_vehicles().unwrap().len(), 1);
    }

    #[test]
    fn test_import_rejects_newer_schema() {
        let source = seeded_store();
        let mut backup = source.export_backup().unwrap();
        backup.schema_version = SCHEMA_VERSION + 1;

        let target = seeded_store();
        let err = target.import_backup(&backup, false).unwrap_err();
        assert!(matches!(err, Error::BackupVersionNewer { .. }));

        // Rejection must leave the target untouched
        assert_eq!(target.count_records(None).unwrap(), 2);

        // Forcing bypasses the gate
        target.import_backup(&backup, true).unwrap();
    }

    #[test]
    fn test_failed_import_rolls_back_wholesale() {
        let source = seeded_store();
        let mut backup = source.export_backup().unwrap();
        // A record pointing at a vehicle the backup does not contain fails
        // the foreign key check partway through the reload.
        backup.data.fuel_records[1].vehicle_id = "no-such-vehicle".to_string();

        let target = seeded_store();
        let before_vehicles = target.list_vehicles().unwrap();
        assert!(target.import_backup(&backup, false).is_err());

        // The wipe must have been rolled back along with the partial reload.
        assert_eq!(target.list_vehicles().unwrap(), before_vehicles);
        assert_eq!(target.count_records(None).unwrap(), 2);
        assert!(target.active_vehicle().unwrap().is_some());
    }

    #[test]
    fn test_import_promotes_active_when_backup_has_none() {
        let source = seeded_store();
        let mut backup = source.export_backup().unwrap();
        for vehicle in &mut backup.data.vehicles {
            vehicle.active = false;
        }

        let target = Store::open_in_memory().unwrap();
        target.import_backup(&backup, false).unwrap();
        assert!(target.active_vehicle().unwrap().is_some());
    }
}
