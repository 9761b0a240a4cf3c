//! Command implementations for the CLI.

mod add;
mod backup;
mod list;
mod stats;
mod vehicle;

pub use add::cmd_add;
pub use backup::{cmd_export, cmd_import};
pub use list::cmd_list;
pub use stats::cmd_stats;
pub use vehicle::cmd_vehicle;

use anyhow::{Context, Result};
use carfuel_store::Store;
use carfuel_types::Vehicle;

/// Resolve a vehicle selector (id or nickname) to a stored vehicle.
///
/// With no selector, the active vehicle is used; when vehicles exist but
/// none is flagged active, one is promoted first.
pub fn resolve_vehicle(store: &Store, selector: Option<String>) -> Result<Vehicle> {
    match selector {
        Some(sel) => store
            .list_vehicles()?
            .into_iter()
            .find(|v| v.id == sel || v.nickname == sel)
            .with_context(|| format!("No vehicle matches '{}'", sel)),
        None => store
            .ensure_active_vehicle()?
            .context("No vehicles registered. Run 'carfuel vehicle add' first"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carfuel_store::NewVehicle;
    use carfuel_types::FuelType;

    fn store_with(nicknames: &[&str]) -> Store {
        let store = Store::open_in_memory().unwrap();
        for nickname in nicknames {
            store
                .insert_vehicle(&NewVehicle {
                    nickname: nickname.to_string(),
                    model: "Fiat Argo 1.0".to_string(),
                    year: 2022,
                    color: "Silver".to_string(),
                    fuel_type: FuelType::Flex,
                    tank_capacity: 48.0,
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn test_resolve_by_nickname() {
        let store = store_with(&["Daily", "Weekend"]);
        let vehicle = resolve_vehicle(&store, Some("Weekend".to_string())).unwrap();
        assert_eq!(vehicle.nickname, "Weekend");
    }

    #[test]
    fn test_resolve_by_id() {
        let store = store_with(&["Daily"]);
        let id = store.list_vehicles().unwrap()[0].id.clone();
        let vehicle = resolve_vehicle(&store, Some(id.clone())).unwrap();
        assert_eq!(vehicle.id, id);
    }

    #[test]
    fn test_resolve_defaults_to_active() {
        let store = store_with(&["Daily", "Weekend"]);
        let vehicle = resolve_vehicle(&store, None).unwrap();
        assert_eq!(vehicle.nickname, "Daily");
    }

    #[test]
    fn test_resolve_fails_on_unknown_selector() {
        let store = store_with(&["Daily"]);
        assert!(resolve_vehicle(&store, Some("Tractor".to_string())).is_err());
    }

    #[test]
    fn test_resolve_fails_with_no_vehicles() {
        let store = Store::open_in_memory().unwrap();
        assert!(resolve_vehicle(&store, None).is_err());
    }
}
