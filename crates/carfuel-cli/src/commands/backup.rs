//! Export and import commands - whole-database JSON backup.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use carfuel_store::{Backup, Store};

/// Execute the export command.
pub fn cmd_export(store: &Store, output: Option<PathBuf>) -> Result<()> {
    let backup = store.export_backup()?;
    let json = backup.to_json()?;

    match output {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("Failed to write backup to {}", path.display()))?;
            eprintln!(
                "Exported {} vehicle(s) and {} fuel record(s) to {}",
                backup.data.vehicles.len(),
                backup.data.fuel_records.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Execute the import command.
///
/// Import replaces the whole database, so it refuses to run without `--yes`
/// and reports what would be overwritten.
pub fn cmd_import(store: &Store, input: &Path, yes: bool, force: bool) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read backup from {}", input.display()))?;
    let backup = Backup::from_json(&text)
        .with_context(|| format!("{} is not a valid backup file", input.display()))?;

    if !yes {
        let vehicles = store.list_vehicles()?.len();
        let records = store.count_records(None)?;
        anyhow::bail!(
            "Import replaces the current database ({} vehicle(s), {} record(s)) with the \
             backup's {} vehicle(s) and {} record(s). Pass --yes to confirm.",
            vehicles,
            records,
            backup.data.vehicles.len(),
            backup.data.fuel_records.len()
        );
    }

    let summary = store
        .import_backup(&backup, force)
        .context("Import failed; the previous data is unchanged")?;

    println!(
        "Imported {} vehicle(s) and {} fuel record(s).",
        summary.vehicles, summary.fuel_records
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use carfuel_store::NewVehicle;
    use carfuel_types::FuelType;

    fn seeded_store() -> Store {
        let store = Store::open_in_memory().unwrap();
        store
            .insert_vehicle(&NewVehicle {
                nickname: "Daily".to_string(),
                model: "Fiat Argo 1.0".to_string(),
                year: 2022,
                color: "Silver".to_string(),
                fuel_type: FuelType::Flex,
                tank_capacity: 48.0,
            })
            .unwrap();
        store
    }

    #[test]
    fn test_export_then_import_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");

        let source = seeded_store();
        cmd_export(&source, Some(path.clone())).unwrap();

        let target = Store::open_in_memory().unwrap();
        cmd_import(&target, &path, true, false).unwrap();

        assert_eq!(target.list_vehicles().unwrap().len(), 1);
        assert_eq!(target.list_vehicles().unwrap()[0].nickname, "Daily");
    }

    #[test]
    fn test_import_refuses_without_yes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");

        let source = seeded_store();
        cmd_export(&source, Some(path.clone())).unwrap();

        let target = Store::open_in_memory().unwrap();
        assert!(cmd_import(&target, &path, false, false).is_err());
        assert!(target.list_vehicles().unwrap().is_empty());
    }

    #[test]
    fn test_import_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");
        fs::write(&path, "{ not json ").unwrap();

        let store = Store::open_in_memory().unwrap();
        assert!(cmd_import(&store, &path, true, false).is_err());
    }
}
