//! Output formatting utilities for text and JSON output.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use carfuel_core::{AggregateStats, Interval};
use carfuel_types::{FuelRecord, Vehicle};

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
}

impl FormatOptions {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }

    fn bold(&self, s: &str) -> String {
        if self.no_color {
            s.to_string()
        } else {
            s.bold().to_string()
        }
    }
}

/// Parse a user-supplied date/time string.
///
/// Accepts RFC3339 or a bare date (YYYY-MM-DD, midnight UTC).
pub fn parse_datetime(s: &str) -> Result<OffsetDateTime> {
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Ok(dt);
    }

    let format = time::format_description::parse("[year]-[month]-[day]")?;
    if let Ok(date) = time::Date::parse(s, &format) {
        return Ok(date.with_hms(0, 0, 0)?.assume_utc());
    }

    anyhow::bail!("Invalid date/time format: {}. Use RFC3339 or YYYY-MM-DD", s)
}

fn format_date(ts: OffsetDateTime) -> String {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    ts.date().format(format).unwrap_or_else(|_| ts.to_string())
}

fn opt_ratio(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if unit.is_empty() => format!("{:.2}", v),
        Some(v) => format!("{:.2} {}", v, unit),
        None => "-".to_string(),
    }
}

/// Format a vehicle list as text.
pub fn format_vehicles_text(vehicles: &[Vehicle], opts: &FormatOptions) -> String {
    let mut out = String::new();
    for vehicle in vehicles {
        let marker = if vehicle.active { "*" } else { " " };
        out.push_str(&format!(
            "{} {}  {} {} ({}, {:.0} L tank)\n    id: {}\n",
            marker,
            opts.bold(&vehicle.nickname),
            vehicle.model,
            vehicle.year,
            vehicle.fuel_type,
            vehicle.tank_capacity,
            vehicle.id,
        ));
    }
    out
}

/// Format fuel records as a text table, one line per record.
pub fn format_records_text(records: &[FuelRecord], opts: &FormatOptions) -> String {
    let mut out = String::new();
    out.push_str(&opts.bold(&format!(
        "{:<12} {:>10} {:>8} {:>7} {:>9}  {:<8} {}\n",
        "Date", "Odometer", "Liters", "Price", "Total", "Tank", "Station"
    )));

    for record in records {
        out.push_str(&format!(
            "{:<12} {:>10.1} {:>8.2} {:>7.2} {:>9.2}  {:<8} {}\n",
            format_date(record.recorded_at),
            record.odometer,
            record.liters,
            record.price_per_liter,
            record.total_cost,
            if record.full_tank { "full" } else { "partial" },
            record.station.as_deref().unwrap_or("-"),
        ));
    }
    out
}

/// Format fuel records as pretty JSON.
pub fn format_records_json(records: &[FuelRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// One interval row in the JSON stats report.
#[derive(Debug, Serialize)]
struct IntervalRow {
    from: String,
    to: String,
    distance_km: i64,
    liters: f64,
    total_cost: f64,
    economy_km_per_l: Option<f64>,
    cost_per_km: Option<f64>,
    valid: bool,
}

impl IntervalRow {
    fn new(interval: &Interval) -> Self {
        Self {
            from: format_date(interval.previous.recorded_at),
            to: format_date(interval.current.recorded_at),
            distance_km: interval.distance_km(),
            liters: interval.liters_consumed(),
            total_cost: interval.total_cost(),
            economy_km_per_l: interval.economy(),
            cost_per_km: interval.cost_per_km(),
            valid: interval.is_valid(),
        }
    }
}

/// The complete JSON stats report.
#[derive(Debug, Serialize)]
struct StatsReport<'a> {
    vehicle_id: &'a str,
    vehicle_nickname: &'a str,
    #[serde(flatten)]
    stats: &'a AggregateStats,
    intervals: Vec<IntervalRow>,
}

/// Format statistics and intervals as text.
pub fn format_stats_text(
    vehicle: &Vehicle,
    stats: &AggregateStats,
    intervals: &[Interval],
    opts: &FormatOptions,
) -> String {
    let mut out = String::new();
    out.push_str(&opts.bold(&format!(
        "Statistics for {} ({} {})\n\n",
        vehicle.nickname, vehicle.model, vehicle.year
    )));

    out.push_str(&format!("  Records:            {}\n", stats.record_count));
    out.push_str(&format!("  Total spent:        {:.2}\n", stats.total_spent));
    out.push_str(&format!(
        "  Overall economy:    {}\n",
        opt_ratio(stats.overall_economy, "km/L")
    ));
    out.push_str(&format!(
        "  Last fill economy:  {}\n",
        opt_ratio(stats.last_interval_economy, "km/L")
    ));
    out.push_str(&format!(
        "  Total distance:     {}\n",
        stats
            .total_distance_km
            .map(|d| format!("{} km", d))
            .unwrap_or_else(|| "-".to_string())
    ));
    out.push_str(&format!(
        "  Cost per km:        {}\n",
        opt_ratio(stats.cost_per_km, "")
    ));
    out.push_str(&format!(
        "  Average price/L:    {}\n",
        opt_ratio(stats.average_price_per_liter, "")
    ));
    out.push_str(&format!(
        "  Last price/L:       {}\n",
        opt_ratio(stats.last_price_per_liter, "")
    ));
    if let Some(trend) = stats.price_trend {
        out.push_str(&format!("  Price trend:        {}\n", trend));
    }

    if !intervals.is_empty() {
        out.push('\n');
        out.push_str(&opts.bold("Intervals (full tank to full tank):\n"));
        for interval in intervals {
            let economy = interval
                .economy()
                .map(|e| format!("{:.2} km/L", e))
                .unwrap_or_else(|| "invalid".to_string());
            out.push_str(&format!(
                "  {} -> {}  {:>5} km  {:>6.1} L  {:>12}  {:>8.2}\n",
                format_date(interval.previous.recorded_at),
                format_date(interval.current.recorded_at),
                interval.distance_km(),
                interval.liters_consumed(),
                economy,
                interval.total_cost(),
            ));
        }
    }

    out
}

/// Format statistics and intervals as pretty JSON.
pub fn format_stats_json(
    vehicle: &Vehicle,
    stats: &AggregateStats,
    intervals: &[Interval],
) -> Result<String> {
    let report = StatsReport {
        vehicle_id: &vehicle.id,
        vehicle_nickname: &vehicle.nickname,
        stats,
        intervals: intervals.iter().map(IntervalRow::new).collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
