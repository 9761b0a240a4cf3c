//! Stats command - fuel economy statistics.

use anyhow::Result;
use carfuel_core::{compute_intervals, compute_statistics};
use carfuel_store::{RecordQuery, Store};

use crate::cli::{OutputFormat, StatsArgs};
use crate::config::{resolve_format, resolve_vehicle_arg, Config};
use crate::format::{format_stats_json, format_stats_text, parse_datetime, FormatOptions};

use super::resolve_vehicle;

/// Execute the stats command.
pub fn cmd_stats(
    store: &Store,
    args: StatsArgs,
    config: &Config,
    opts: FormatOptions,
) -> Result<()> {
    let selector = resolve_vehicle_arg(args.vehicle, config);
    let vehicle = resolve_vehicle(store, selector)?;

    let mut query = RecordQuery::new().vehicle(&vehicle.id).oldest_first();
    if let Some(ref since) = args.since {
        query = query.since(parse_datetime(since)?);
    }

    let records = store.query_records(&query)?;
    let stats = compute_statistics(&records);
    let intervals = compute_intervals(&records);

    match resolve_format(args.format, config) {
        OutputFormat::Text => {
            print!("{}", format_stats_text(&vehicle, &stats, &intervals, &opts));
        }
        OutputFormat::Json => {
            println!("{}", format_stats_json(&vehicle, &stats, &intervals)?);
        }
    }

    Ok(())
}
