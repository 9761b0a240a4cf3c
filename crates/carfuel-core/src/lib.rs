//! Fuel-economy statistics engine for CarFuel.
//!
//! This crate turns a vehicle's fuel purchase history into display-ready
//! statistics. Everything here is a pure function over an input snapshot:
//! no I/O, no caching, no shared state. Callers fetch the records for one
//! vehicle from storage and hand them over; the functions sort internally,
//! so input order does not matter.
//!
//! The central idea is the *consumption interval*: the span between two
//! consecutive full-tank fills. Only a full tank makes the math honest:
//! the distance driven since the previous full tank is exactly covered by
//! the fuel needed to fill back up (the current fill plus any partial
//! top-offs in between).
//!
//! # Example
//!
//! ```
//! use carfuel_core::{compute_intervals, compute_statistics};
//!
//! let records = vec![]; // fetched from storage, any order
//! let intervals = compute_intervals(&records);
//! let stats = compute_statistics(&records);
//! assert_eq!(stats.record_count, 0);
//! assert_eq!(stats.total_spent, 0.0);
//! ```
//!
//! Ratios whose denominator would be zero or negative are *absent*
//! (`None`), never NaN or infinity. Malformed data (odometer rollback,
//! non-positive volumes) keeps its interval visible for display but
//! excludes it from every average.

pub mod fill;
pub mod intervals;
pub mod stats;
pub mod validation;

pub use fill::{resolve_fill, FillAmounts};
pub use intervals::{compute_intervals, Interval};
pub use stats::{compute_statistics, AggregateStats, PriceTrend};
pub use validation::{validate_new_record, RecordWarning, ValidationResult};
