//! SQLite persistence for CarFuel vehicles and fuel records.
//!
//! This crate owns the on-disk state: a vehicle table with a single
//! application-enforced active flag and a fuel-record table referencing it.
//! Timestamps are stored as sortable RFC 3339 UTC text, booleans as 0/1
//! integers, identifiers as opaque UUID strings.
//!
//! # Features
//!
//! - Vehicle and fuel-record CRUD, scoped queries via [`RecordQuery`]
//! - Active-vehicle invariant with self-healing promotion
//! - Schema versioning with a migration hook
//! - Whole-database JSON backup export/import in one transaction
//!
//! # Example
//!
//! ```no_run
//! use carfuel_store::{RecordQuery, Store};
//!
//! let store = Store::open_default()?;
//! if let Some(vehicle) = store.active_vehicle()? {
//!     let records = store.query_records(&RecordQuery::new().vehicle(&vehicle.id))?;
//!     println!("{} records", records.len());
//! }
//! # Ok::<(), carfuel_store::Error>(())
//! ```

mod backup;
mod error;
mod models;
mod queries;
mod schema;
mod store;

pub use backup::{Backup, BackupData, ImportSummary};
pub use error::{Error, Result};
pub use models::{NewFuelRecord, NewVehicle};
pub use queries::RecordQuery;
pub use schema::SCHEMA_VERSION;
pub use store::Store;

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/carfuel/carfuel.db`
/// - macOS: `~/Library/Application Support/carfuel/carfuel.db`
/// - Windows: `C:\Users\<user>\AppData\Local\carfuel\carfuel.db`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("carfuel")
        .join("carfuel.db")
}
