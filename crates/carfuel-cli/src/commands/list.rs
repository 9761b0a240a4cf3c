//! List command - show fuel records.

use anyhow::Result;
use carfuel_store::{RecordQuery, Store};

use crate::cli::{ListArgs, OutputFormat};
use crate::config::{resolve_format, resolve_vehicle_arg, Config};
use crate::format::{format_records_json, format_records_text, parse_datetime, FormatOptions};

use super::resolve_vehicle;

/// Execute the list command.
pub fn cmd_list(store: &Store, args: ListArgs, config: &Config, opts: FormatOptions) -> Result<()> {
    let selector = resolve_vehicle_arg(args.vehicle, config);
    let vehicle = resolve_vehicle(store, selector)?;

    let mut query = RecordQuery::new().vehicle(&vehicle.id);

    if let Some(ref since) = args.since {
        query = query.since(parse_datetime(since)?);
    }
    if let Some(ref until) = args.until {
        query = query.until(parse_datetime(until)?);
    }
    if args.full_tank {
        query = query.full_tank_only();
    }
    if args.limit > 0 {
        query = query.limit(args.limit);
    }

    let records = store.query_records(&query)?;

    if records.is_empty() {
        println!("No fuel records for {}.", vehicle.nickname);
        return Ok(());
    }

    match resolve_format(args.format, config) {
        OutputFormat::Text => {
            print!("{}", format_records_text(&records, &opts));
        }
        OutputFormat::Json => println!("{}", format_records_json(&records)?),
    }

    Ok(())
}
