//! Shared data types for the CarFuel fuel-tracking tool.
//!
//! This crate provides the plain record types that every other crate in the
//! workspace consumes: fuel purchase records, vehicles, and the fuel-type
//! enum, along with the parse errors produced when converting loosely-typed
//! input (CLI arguments, stored text columns) into these types.
//!
//! # Example
//!
//! ```
//! use carfuel_types::FuelType;
//!
//! let fuel: FuelType = "diesel".parse()?;
//! assert_eq!(fuel, FuelType::Diesel);
//! # Ok::<(), carfuel_types::ParseError>(())
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{FuelRecord, FuelType, Vehicle};
