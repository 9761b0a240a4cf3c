//! Fill-amount derivation.
//!
//! A fuel purchase has three related quantities (price per liter, liters,
//! and total cost) and users typically enter only two of them. This module
//! derives the missing one as a pure function, keeping the arithmetic out
//! of any form or CLI binding so it can be tested on its own.

use serde::Serialize;

/// A fully resolved set of fill amounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FillAmounts {
    /// Price paid per liter.
    pub price_per_liter: f64,
    /// Liters purchased.
    pub liters: f64,
    /// Total amount paid.
    pub total_cost: f64,
}

/// Resolve the three fill amounts from whichever subset was entered.
///
/// Given any two of {price per liter, liters, total cost}, derives the
/// third. When all three are supplied they are kept as entered (rounding
/// drift between them is tolerated, not corrected). Returns `None` when
/// fewer than two values are known, or when the derivation would divide
/// by zero.
#[must_use]
pub fn resolve_fill(
    price_per_liter: Option<f64>,
    liters: Option<f64>,
    total_cost: Option<f64>,
) -> Option<FillAmounts> {
    match (price_per_liter, liters, total_cost) {
        (Some(price), Some(liters), Some(total)) => Some(FillAmounts {
            price_per_liter: price,
            liters,
            total_cost: total,
        }),
        (Some(price), Some(liters), None) => Some(FillAmounts {
            price_per_liter: price,
            liters,
            total_cost: price * liters,
        }),
        (Some(price), None, Some(total)) if price != 0.0 => Some(FillAmounts {
            price_per_liter: price,
            liters: total / price,
            total_cost: total,
        }),
        (None, Some(liters), Some(total)) if liters != 0.0 => Some(FillAmounts {
            price_per_liter: total / liters,
            liters,
            total_cost: total,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_total_from_price_and_liters() {
        let fill = resolve_fill(Some(5.89), Some(40.0), None).unwrap();
        assert!((fill.total_cost - 235.6).abs() < 1e-9);
        assert_eq!(fill.price_per_liter, 5.89);
        assert_eq!(fill.liters, 40.0);
    }

    #[test]
    fn test_derive_liters_from_price_and_total() {
        let fill = resolve_fill(Some(6.0), None, Some(240.0)).unwrap();
        assert!((fill.liters - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_derive_price_from_liters_and_total() {
        let fill = resolve_fill(None, Some(40.0), Some(240.0)).unwrap();
        assert!((fill.price_per_liter - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_three_kept_as_entered() {
        // 5.89 * 40 = 235.60, but the pump printed 235.58. Keep it.
        let fill = resolve_fill(Some(5.89), Some(40.0), Some(235.58)).unwrap();
        assert_eq!(fill.total_cost, 235.58);
    }

    #[test]
    fn test_insufficient_input() {
        assert_eq!(resolve_fill(None, None, None), None);
        assert_eq!(resolve_fill(Some(5.89), None, None), None);
        assert_eq!(resolve_fill(None, Some(40.0), None), None);
        assert_eq!(resolve_fill(None, None, Some(240.0)), None);
    }

    #[test]
    fn test_zero_divisor_rejected() {
        assert_eq!(resolve_fill(Some(0.0), None, Some(240.0)), None);
        assert_eq!(resolve_fill(None, Some(0.0), Some(240.0)), None);
    }
}
