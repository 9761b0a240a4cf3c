//! Sanity checks for new fuel records.
//!
//! Validation never fails hard: it produces warnings the caller can show
//! before saving (a form blocks submission, the CLI asks for `--force`).
//! The statistics engine stays oblivious; it already treats malformed
//! intervals as invalid for averaging on its own.

use core::fmt;

use serde::Serialize;

use carfuel_types::FuelRecord;

use crate::intervals::sorted;

/// Relative drift between `total_cost` and `price * liters` above which a
/// mismatch warning is raised. Manual entry rounds, pumps truncate; a few
/// cents is normal, a few percent is a typo.
const TOTAL_DRIFT_TOLERANCE: f64 = 0.05;

/// A suspicious property of a candidate record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RecordWarning {
    /// Odometer is not past the chronologically preceding record's reading.
    OdometerNotIncreasing { value: f64, previous: f64 },
    /// Liters must be positive for any consumption math.
    NonPositiveLiters { value: f64 },
    /// Price per liter must be positive.
    NonPositivePrice { value: f64 },
    /// Total cost strays too far from price x liters.
    TotalCostMismatch { total: f64, expected: f64 },
}

impl fmt::Display for RecordWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordWarning::OdometerNotIncreasing { value, previous } => write!(
                f,
                "Odometer {value} km is not past the previous reading of {previous} km"
            ),
            RecordWarning::NonPositiveLiters { value } => {
                write!(f, "Liters must be positive, got {value}")
            }
            RecordWarning::NonPositivePrice { value } => {
                write!(f, "Price per liter must be positive, got {value}")
            }
            RecordWarning::TotalCostMismatch { total, expected } => write!(
                f,
                "Total cost {total:.2} differs from price x liters = {expected:.2}"
            ),
        }
    }
}

/// Outcome of validating a candidate record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Warnings found, in the order they were detected.
    pub warnings: Vec<RecordWarning>,
}

impl ValidationResult {
    /// Whether any warning was raised.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Validate a candidate record against the vehicle's existing history.
///
/// `existing` may be in any order; the candidate is compared against the
/// record that would precede it chronologically. Returns warnings only;
/// saving a flagged record is the caller's decision.
#[must_use]
pub fn validate_new_record(existing: &[FuelRecord], candidate: &FuelRecord) -> ValidationResult {
    let mut result = ValidationResult::default();

    let sorted = sorted(existing);
    let predecessor = sorted
        .iter()
        .filter(|r| r.recorded_at <= candidate.recorded_at)
        .next_back();
    if let Some(prev) = predecessor {
        if candidate.odometer <= prev.odometer {
            result.warnings.push(RecordWarning::OdometerNotIncreasing {
                value: candidate.odometer,
                previous: prev.odometer,
            });
        }
    }

    if candidate.liters <= 0.0 {
        result.warnings.push(RecordWarning::NonPositiveLiters {
            value: candidate.liters,
        });
    }

    if candidate.price_per_liter <= 0.0 {
        result.warnings.push(RecordWarning::NonPositivePrice {
            value: candidate.price_per_liter,
        });
    }

    if candidate.liters > 0.0 && candidate.price_per_liter > 0.0 {
        let expected = candidate.price_per_liter * candidate.liters;
        if (candidate.total_cost - expected).abs() > expected * TOTAL_DRIFT_TOLERANCE {
            result.warnings.push(RecordWarning::TotalCostMismatch {
                total: candidate.total_cost,
                expected,
            });
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::tests::record;
    use time::macros::datetime;

    #[test]
    fn test_clean_record_no_warnings() {
        let existing = vec![record("a", datetime!(2025-01-01 08:00 UTC), 1000.0, 30.0, 180.0, true)];
        let candidate = record("b", datetime!(2025-01-15 08:00 UTC), 1450.0, 30.0, 180.0, true);

        let result = validate_new_record(&existing, &candidate);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_odometer_regression_flagged() {
        let existing = vec![record("a", datetime!(2025-01-01 08:00 UTC), 1450.0, 30.0, 180.0, true)];
        let candidate = record("b", datetime!(2025-01-15 08:00 UTC), 1000.0, 30.0, 180.0, true);

        let result = validate_new_record(&existing, &candidate);
        assert_eq!(
            result.warnings,
            vec![RecordWarning::OdometerNotIncreasing {
                value: 1000.0,
                previous: 1450.0,
            }]
        );
    }

    #[test]
    fn test_odometer_compared_to_chronological_predecessor() {
        // Candidate is backdated between a and c: it must beat a's reading,
        // not c's.
        let existing = vec![
            record("a", datetime!(2025-01-01 08:00 UTC), 1000.0, 30.0, 180.0, true),
            record("c", datetime!(2025-02-01 08:00 UTC), 1900.0, 30.0, 180.0, true),
        ];
        let candidate = record("b", datetime!(2025-01-15 08:00 UTC), 1450.0, 30.0, 180.0, true);

        let result = validate_new_record(&existing, &candidate);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_first_record_has_no_odometer_check() {
        let candidate = record("a", datetime!(2025-01-01 08:00 UTC), 0.0, 30.0, 180.0, true);
        let result = validate_new_record(&[], &candidate);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_non_positive_amounts_flagged() {
        let mut candidate = record("a", datetime!(2025-01-01 08:00 UTC), 1000.0, 30.0, 180.0, true);
        candidate.liters = 0.0;
        candidate.price_per_liter = -1.0;

        let result = validate_new_record(&[], &candidate);
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_total_cost_drift_flagged() {
        let mut candidate = record("a", datetime!(2025-01-01 08:00 UTC), 1000.0, 40.0, 240.0, true);
        candidate.price_per_liter = 6.0;
        candidate.total_cost = 300.0; // 25% off

        let result = validate_new_record(&[], &candidate);
        assert_eq!(
            result.warnings,
            vec![RecordWarning::TotalCostMismatch {
                total: 300.0,
                expected: 240.0,
            }]
        );

        // Small pump rounding stays quiet.
        candidate.total_cost = 239.95;
        assert!(!validate_new_record(&[], &candidate).has_warnings());
    }
}
