//! Whole-history aggregate statistics.

use core::fmt;

use serde::Serialize;
use tracing::debug;

use carfuel_types::FuelRecord;

use crate::intervals::{compute_intervals, sorted};

/// How the latest price per liter compares to the historical mean.
///
/// The percentage is the deviation from the mean, rounded to the nearest
/// whole percent. `Equal` is only produced on exact equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "direction", content = "percent", rename_all = "lowercase")]
pub enum PriceTrend {
    /// Latest price is above the mean by the given percent.
    Above(i64),
    /// Latest price is below the mean by the given percent.
    Below(i64),
    /// Latest price exactly equals the mean.
    Equal,
}

impl fmt::Display for PriceTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceTrend::Above(pct) => write!(f, "+{}% vs average", pct),
            PriceTrend::Below(pct) => write!(f, "-{}% vs average", pct),
            PriceTrend::Equal => write!(f, "equal to average"),
        }
    }
}

/// Aggregate statistics over a vehicle's entire fuel history.
///
/// Every ratio is optional: a missing value means the data cannot support
/// the computation (too few records, no valid interval, zero distance),
/// and the UI renders a placeholder instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStats {
    /// Number of fuel records, full and partial alike.
    pub record_count: usize,
    /// Money spent across all records. Always present; zero when empty.
    pub total_spent: f64,
    /// Σ distance / Σ liters over all valid consumption intervals.
    pub overall_economy: Option<f64>,
    /// Economy of the most recent valid interval.
    pub last_interval_economy: Option<f64>,
    /// Odometer span across the whole history, in whole km.
    pub total_distance_km: Option<i64>,
    /// Spend per km, excluding the first record's cost (no predecessor to
    /// attribute its distance to).
    pub cost_per_km: Option<f64>,
    /// Unweighted mean of price per liter across all records.
    pub average_price_per_liter: Option<f64>,
    /// Price per liter of the most recent record.
    pub last_price_per_liter: Option<f64>,
    /// Deviation of the latest price from the mean.
    pub price_trend: Option<PriceTrend>,
}

/// Compute aggregate statistics for one vehicle's records.
///
/// Pure function of the input snapshot: accepts any order (sorts
/// internally) and always returns the same output for the same records.
/// Never panics, regardless of how few or how malformed the records are.
#[must_use]
pub fn compute_statistics(records: &[FuelRecord]) -> AggregateStats {
    let sorted = sorted(records);
    let record_count = sorted.len();
    let total_spent = sorted.iter().map(|r| r.total_cost).sum::<f64>();

    let mut stats = AggregateStats {
        record_count,
        total_spent,
        overall_economy: None,
        last_interval_economy: None,
        total_distance_km: None,
        cost_per_km: None,
        average_price_per_liter: None,
        last_price_per_liter: None,
        price_trend: None,
    };

    if record_count < 2 {
        return stats;
    }

    let intervals = compute_intervals(&sorted);
    let valid: Vec<_> = intervals.iter().filter(|i| i.is_valid()).collect();
    debug!(
        intervals = intervals.len(),
        valid = valid.len(),
        "computed consumption intervals"
    );

    let total_interval_km: i64 = valid.iter().map(|i| i.distance_km()).sum();
    let total_interval_liters: f64 = valid.iter().map(|i| i.liters_consumed()).sum();
    if total_interval_liters > 0.0 {
        stats.overall_economy = Some(total_interval_km as f64 / total_interval_liters);
    }
    stats.last_interval_economy = valid.last().and_then(|i| i.economy());

    // Whole-history distance spans every record, not just full tanks.
    let first = &sorted[0];
    let last = &sorted[record_count - 1];
    let total_distance = last.odometer.round() as i64 - first.odometer.round() as i64;
    stats.total_distance_km = Some(total_distance);

    if total_distance > 0 {
        // The first fill's cost bought fuel for distance we never observed.
        let spent_after_first: f64 = sorted[1..].iter().map(|r| r.total_cost).sum();
        stats.cost_per_km = Some(spent_after_first / total_distance as f64);
    }

    let average_price =
        sorted.iter().map(|r| r.price_per_liter).sum::<f64>() / record_count as f64;
    let last_price = last.price_per_liter;
    stats.average_price_per_liter = Some(average_price);
    stats.last_price_per_liter = Some(last_price);
    stats.price_trend = price_trend(last_price, average_price);

    stats
}

/// Deviation of the latest price from the mean, rounded to whole percent.
fn price_trend(last: f64, average: f64) -> Option<PriceTrend> {
    if last == average {
        Some(PriceTrend::Equal)
    } else if average > 0.0 {
        if last > average {
            Some(PriceTrend::Above(((last / average - 1.0) * 100.0).round() as i64))
        } else {
            Some(PriceTrend::Below(((1.0 - last / average) * 100.0).round() as i64))
        }
    } else {
        None
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use carfuel_types::{FuelRecord, FuelType};
    use time::macros::datetime;
    use time::OffsetDateTime;

    /// Build a bare-bones record; price per liter is derived from
    /// cost / liters where possible.
    pub(crate) fn record(
        id: &str,
        recorded_at: OffsetDateTime,
        odometer: f64,
        liters: f64,
        total_cost: f64,
        full_tank: bool,
    ) -> FuelRecord {
        FuelRecord {
            id: id.to_string(),
            vehicle_id: "veh-1".to_string(),
            recorded_at,
            price_per_liter: if liters > 0.0 { total_cost / liters } else { 0.0 },
            liters,
            total_cost,
            fuel_type: FuelType::Gasoline,
            odometer,
            full_tank,
            station: None,
            checked_tires: false,
            checked_oil: false,
            used_additive: false,
            notes: None,
            created_at: recorded_at,
            updated_at: recorded_at,
        }
    }

    fn sample_history() -> Vec<FuelRecord> {
        vec![
            record("a", datetime!(2025-01-01 08:00 UTC), 1000.0, 35.0, 210.0, true),
            record("p", datetime!(2025-01-08 08:00 UTC), 1200.0, 10.0, 60.0, false),
            record("b", datetime!(2025-01-15 08:00 UTC), 1450.0, 30.0, 180.0, true),
        ]
    }

    #[test]
    fn test_empty_history() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats.record_count, 0);
        assert_eq!(stats.total_spent, 0.0);
        assert_eq!(stats.overall_economy, None);
        assert_eq!(stats.last_interval_economy, None);
        assert_eq!(stats.total_distance_km, None);
        assert_eq!(stats.cost_per_km, None);
        assert_eq!(stats.average_price_per_liter, None);
        assert_eq!(stats.last_price_per_liter, None);
        assert_eq!(stats.price_trend, None);
    }

    #[test]
    fn test_single_record_only_count_and_spend() {
        let records = vec![record("a", datetime!(2025-01-01 08:00 UTC), 1000.0, 30.0, 180.0, true)];
        let stats = compute_statistics(&records);
        assert_eq!(stats.record_count, 1);
        assert!((stats.total_spent - 180.0).abs() < 1e-9);
        assert_eq!(stats.overall_economy, None);
        assert_eq!(stats.total_distance_km, None);
        assert_eq!(stats.average_price_per_liter, None);
    }

    #[test]
    fn test_sample_history_aggregates() {
        let stats = compute_statistics(&sample_history());

        assert_eq!(stats.record_count, 3);
        // All records count toward spend, partials included.
        assert!((stats.total_spent - 450.0).abs() < 1e-9);
        // One interval: 450 km on 40 L.
        assert_eq!(stats.overall_economy, Some(11.25));
        assert_eq!(stats.last_interval_economy, Some(11.25));
        // Whole-history distance spans partials too.
        assert_eq!(stats.total_distance_km, Some(450));
        // Cost per km excludes the first record: (60 + 180) / 450.
        assert!((stats.cost_per_km.unwrap() - 240.0 / 450.0).abs() < 1e-9);
        // Every record priced at 6.00/L here.
        assert!((stats.average_price_per_liter.unwrap() - 6.0).abs() < 1e-9);
        assert_eq!(stats.price_trend, Some(PriceTrend::Equal));
    }

    #[test]
    fn test_partials_only_history_keeps_sums() {
        let records = vec![
            record("a", datetime!(2025-01-01 08:00 UTC), 1000.0, 10.0, 60.0, false),
            record("b", datetime!(2025-01-10 08:00 UTC), 1300.0, 10.0, 66.0, false),
        ];

        let stats = compute_statistics(&records);
        assert_eq!(stats.overall_economy, None);
        assert_eq!(stats.last_interval_economy, None);
        assert_eq!(stats.total_distance_km, Some(300));
        assert!((stats.cost_per_km.unwrap() - 66.0 / 300.0).abs() < 1e-9);
        assert!((stats.total_spent - 126.0).abs() < 1e-9);
    }

    #[test]
    fn test_rollback_interval_excluded_from_overall() {
        let records = vec![
            record("a", datetime!(2025-01-01 08:00 UTC), 1000.0, 35.0, 210.0, true),
            record("b", datetime!(2025-01-15 08:00 UTC), 1450.0, 30.0, 180.0, true),
            // Odometer goes backwards: the b..c interval must not pollute
            // the overall average.
            record("c", datetime!(2025-02-01 08:00 UTC), 900.0, 28.0, 170.0, true),
        ];

        let stats = compute_statistics(&records);
        assert_eq!(stats.overall_economy, Some(15.0)); // 450 / 30
        assert_eq!(stats.last_interval_economy, Some(15.0));
        // Whole-history span is negative, so cost per km is absent.
        assert_eq!(stats.total_distance_km, Some(-100));
        assert_eq!(stats.cost_per_km, None);
    }

    #[test]
    fn test_last_interval_economy_tracks_most_recent_valid() {
        let records = vec![
            record("a", datetime!(2025-01-01 08:00 UTC), 1000.0, 35.0, 210.0, true),
            record("b", datetime!(2025-01-15 08:00 UTC), 1450.0, 30.0, 180.0, true),
            record("c", datetime!(2025-02-01 08:00 UTC), 1750.0, 25.0, 150.0, true),
        ];

        let stats = compute_statistics(&records);
        assert_eq!(stats.last_interval_economy, Some(12.0)); // 300 / 25
        // Overall pools both intervals: 750 km on 55 L.
        assert!((stats.overall_economy.unwrap() - 750.0 / 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_price_trend_above_and_below() {
        assert_eq!(price_trend(6.6, 6.0), Some(PriceTrend::Above(10)));
        assert_eq!(price_trend(5.4, 6.0), Some(PriceTrend::Below(10)));
        assert_eq!(price_trend(6.0, 6.0), Some(PriceTrend::Equal));
        // Rounded to nearest whole percent.
        assert_eq!(price_trend(6.07, 6.0), Some(PriceTrend::Above(1)));
        assert_eq!(price_trend(0.0, 0.0), Some(PriceTrend::Equal));
    }

    #[test]
    fn test_price_trend_display() {
        assert_eq!(PriceTrend::Above(12).to_string(), "+12% vs average");
        assert_eq!(PriceTrend::Below(3).to_string(), "-3% vs average");
        assert_eq!(PriceTrend::Equal.to_string(), "equal to average");
    }

    #[test]
    fn test_idempotence_and_order_independence() {
        let records = sample_history();
        let first = compute_statistics(&records);
        let second = compute_statistics(&records);
        assert_eq!(first, second);

        let mut shuffled = records.clone();
        shuffled.reverse();
        assert_eq!(compute_statistics(&shuffled), first);
    }

    #[test]
    fn test_stats_serialize_to_json() {
        let stats = compute_statistics(&sample_history());
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["record_count"], 3);
        assert_eq!(json["overall_economy"], 11.25);
        assert_eq!(json["price_trend"]["direction"], "equal");
    }
}
