//! Consumption-interval partitioning.
//!
//! An [`Interval`] spans from one full-tank record to the next later one,
//! carrying the partial fills strictly between them by timestamp. Intervals
//! are derived on every call and never persisted.

use carfuel_types::FuelRecord;

/// The span between two consecutive full-tank fills.
///
/// `previous` and `current` are the anchoring full-tank records;
/// `partials` holds every non-full-tank record whose timestamp falls
/// strictly between the two anchors, in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    /// The earlier full-tank anchor.
    pub previous: FuelRecord,
    /// The later full-tank anchor.
    pub current: FuelRecord,
    /// Partial fills between the anchors, oldest first.
    pub partials: Vec<FuelRecord>,
}

impl Interval {
    /// Distance covered in this interval, in whole km.
    ///
    /// Odometer readings are rounded to the nearest km before subtracting,
    /// matching historical display precision. May be zero or negative when
    /// the data is malformed (odometer rollback).
    #[must_use]
    pub fn distance_km(&self) -> i64 {
        self.current.odometer.round() as i64 - self.previous.odometer.round() as i64
    }

    /// Total fuel volume consumed to cover [`distance_km`](Self::distance_km):
    /// the current fill plus every partial fill since the previous full tank.
    #[must_use]
    pub fn liters_consumed(&self) -> f64 {
        self.current.liters + self.partials.iter().map(|p| p.liters).sum::<f64>()
    }

    /// Total money spent in this interval (current fill plus partials).
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.current.total_cost + self.partials.iter().map(|p| p.total_cost).sum::<f64>()
    }

    /// Average fuel economy in km per liter.
    ///
    /// Absent when the distance is not positive (rollback or duplicate
    /// odometer entry) or the consumed volume is not positive (malformed
    /// data). Dividing by either would be meaningless.
    #[must_use]
    pub fn economy(&self) -> Option<f64> {
        let distance = self.distance_km();
        let liters = self.liters_consumed();
        if distance > 0 && liters > 0.0 {
            Some(distance as f64 / liters)
        } else {
            None
        }
    }

    /// Cost per km driven. Absent when the distance is not positive.
    #[must_use]
    pub fn cost_per_km(&self) -> Option<f64> {
        let distance = self.distance_km();
        if distance > 0 {
            Some(self.total_cost() / distance as f64)
        } else {
            None
        }
    }

    /// Whether this interval may contribute to averages.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.economy().is_some()
    }
}

/// Sort records chronologically, ties broken by id for determinism.
pub(crate) fn sorted(records: &[FuelRecord]) -> Vec<FuelRecord> {
    let mut sorted: Vec<FuelRecord> = records.to_vec();
    sorted.sort_by(|a, b| {
        a.recorded_at
            .cmp(&b.recorded_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    sorted
}

/// Partition a vehicle's records into consumption intervals.
///
/// Accepts records in any order and sorts internally. With fewer than two
/// full-tank records no interval can be formed and an empty vector is
/// returned; insufficient data is not an error.
///
/// Partials whose timestamp exactly equals an anchor's are excluded from
/// both neighboring intervals (strict inequality on both boundaries).
#[must_use]
pub fn compute_intervals(records: &[FuelRecord]) -> Vec<Interval> {
    let sorted = sorted(records);
    let full_tanks: Vec<&FuelRecord> = sorted.iter().filter(|r| r.full_tank).collect();

    if full_tanks.len() < 2 {
        return Vec::new();
    }

    full_tanks
        .windows(2)
        .map(|pair| {
            let (prev, cur) = (pair[0], pair[1]);
            let partials = sorted
                .iter()
                .filter(|r| {
                    !r.full_tank
                        && r.recorded_at > prev.recorded_at
                        && r.recorded_at < cur.recorded_at
                })
                .cloned()
                .collect();
            Interval {
                previous: prev.clone(),
                current: cur.clone(),
                partials,
            }
        })
        .collect()
}
