//! Query builder for fuel records.
//!
//! This module provides a fluent query builder for filtering and paginating
//! stored fuel records. [`RecordQuery`] follows the builder pattern for
//! ergonomic query construction.
//!
//! # Example
//!
//! ```
//! use carfuel_store::{RecordQuery, Store};
//! use time::{Duration, OffsetDateTime};
//!
//! let store = Store::open_in_memory()?;
//! let last_month = OffsetDateTime::now_utc() - Duration::days(30);
//!
//! // Query recent records for a vehicle, newest first
//! let query = RecordQuery::new()
//!     .vehicle("3f9c0e7a")
//!     .since(last_month)
//!     .limit(50);
//!
//! let records = store.query_records(&query)?;
//!
//! // Query only full tanks in chronological order for interval math
//! let chronological = RecordQuery::new()
//!     .vehicle("3f9c0e7a")
//!     .oldest_first();
//!
//! let history = store.query_records(&chronological)?;
//! # Ok::<(), carfuel_store::Error>(())
//! ```

use time::OffsetDateTime;

use crate::error::Result;
use crate::models::timestamp_to_text;

/// Fluent query builder for fuel records.
///
/// Use this to construct queries for [`Store::query_records`](crate::Store::query_records).
/// All filter methods are optional and can be chained in any order.
///
/// By default, queries return results ordered by `recorded_at` descending
/// (newest first). Equal timestamps are tie-broken by `id` so ordering is
/// deterministic.
///
/// # Example
///
/// ```
/// use carfuel_store::RecordQuery;
/// use time::{Duration, OffsetDateTime};
///
/// let now = OffsetDateTime::now_utc();
///
/// // Last quarter's purchases for a vehicle
/// let query = RecordQuery::new()
///     .vehicle("3f9c0e7a")
///     .since(now - Duration::days(90))
///     .limit(100);
///
/// // Query with pagination
/// let page_2 = RecordQuery::new()
///     .vehicle("3f9c0e7a")
///     .limit(50)
///     .offset(50);
///
/// // Only full-tank anchors, oldest first
/// let anchors = RecordQuery::new()
///     .vehicle("3f9c0e7a")
///     .full_tank_only()
///     .oldest_first();
/// ```
#[derive(Debug, Default, Clone)]
pub struct RecordQuery {
    /// Filter by vehicle ID.
    pub vehicle_id: Option<String>,
    /// Filter records at or after this time.
    pub since: Option<OffsetDateTime>,
    /// Filter records at or before this time.
    pub until: Option<OffsetDateTime>,
    /// Only include full-tank records.
    pub full_tank: bool,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
    /// Order by recorded_at descending (newest first).
    pub newest_first: bool,
}

impl RecordQuery {
    /// Create a new query with default settings.
    ///
    /// Default behavior:
    /// - No vehicle filter (all vehicles)
    /// - No time range filter
    /// - Partial and full-tank records alike
    /// - No limit (all matching records)
    /// - Ordered by newest first
    pub fn new() -> Self {
        Self {
            newest_first: true,
            ..Default::default()
        }
    }

    /// Filter by vehicle ID.
    ///
    /// Only include records belonging to the specified vehicle.
    pub fn vehicle(mut self, vehicle_id: &str) -> Self {
        self.vehicle_id = Some(vehicle_id.to_string());
        self
    }

    /// Filter to records at or after this time.
    ///
    /// Useful for querying "last N days" of purchases.
    pub fn since(mut self, time: OffsetDateTime) -> Self {
        self.since = Some(time);
        self
    }

    /// Filter to records at or before this time.
    ///
    /// Use with `since()` to query a specific time range.
    pub fn until(mut self, time: OffsetDateTime) -> Self {
        self.until = Some(time);
        self
    }

    /// Only include full-tank records.
    ///
    /// Full tanks anchor consumption intervals; partial fills are skipped.
    pub fn full_tank_only(mut self) -> Self {
        self.full_tank = true;
        self
    }

    /// Limit the maximum number of results returned.
    ///
    /// Use with `offset()` for pagination.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first N results.
    ///
    /// Use with `limit()` for pagination. For example, to get page 2
    /// with 50 items per page: `.limit(50).offset(50)`.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Order results by oldest first (ascending by `recorded_at`).
    ///
    /// By default, queries return newest first. Use this for chronological
    /// ordering, which is what the statistics engine expects.
    pub fn oldest_first(mut self) -> Self {
        self.newest_first = false;
        self
    }

    /// Build the SQL WHERE clause and parameters.
    ///
    /// Timestamps are compared as RFC 3339 UTC text, which sorts
    /// chronologically, so bound times are rendered before binding.
    pub(crate) fn build_where(&self) -> Result<(String, Vec<Box<dyn rusqlite::ToSql>>)> {
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref vehicle_id) = self.vehicle_id {
            conditions.push("vehicle_id = ?");
            params.push(Box::new(vehicle_id.clone()));
        }

        if let Some(since) = self.since {
            conditions.push("recorded_at >= ?");
            params.push(Box::new(timestamp_to_text(since)?));
        }

        if let Some(until) = self.until {
            conditions.push("recorded_at <= ?");
            params.push(Box::new(timestamp_to_text(until)?));
        }

        if self.full_tank {
            conditions.push("full_tank = 1");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        Ok((where_clause, params))
    }

    /// Build the full SQL query.
    pub(crate) fn build_sql(&self) -> Result<String> {
        let (where_clause, _) = self.build_where()?;
        let order = if self.newest_first { "DESC" } else { "ASC" };

        let mut sql = format!(
            "SELECT id, vehicle_id, recorded_at, price_per_liter, liters, total_cost, \
             fuel_type, odometer, full_tank, station, checked_tires, checked_oil, \
             used_additive, notes, created_at, updated_at \
             FROM fuel_records {} ORDER BY recorded_at {}, id {}",
            where_clause, order, order
        );

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        Ok(sql)
    }
}
