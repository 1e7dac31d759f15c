//! Period-comparison statistics aggregator for the admin dashboard.
//!
//! Compares the 30-day window ending at the evaluation instant against
//! the 30 days before it, across sales, active users, and order
//! completion. The aggregator is a pure function of (`now`, data store
//! contents): the clock is an explicit argument and all reads go
//! through the [`StatsSource`] trait, so the logic is storage-agnostic
//! and testable against an in-memory fake.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{DashboardStats, OrderStatus};

/// Length of the comparison periods, in days.
pub const PERIOD_DAYS: i64 = 30;

/// Error surfaced when any underlying data store query fails.
///
/// The aggregator does not retry or return partial results; one failed
/// query fails the whole computation and the caller decides what to do.
#[derive(Debug, Error)]
#[error("data store query failed: {0}")]
pub struct DataAccessError(pub String);

impl From<sqlx::Error> for DataAccessError {
    fn from(err: sqlx::Error) -> Self {
        DataAccessError(err.to_string())
    }
}

/// A half-open time window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl PeriodWindow {
    /// The 30-day window ending at `now`.
    pub fn current(now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::days(PERIOD_DAYS),
            end: now,
        }
    }

    /// The 30-day window immediately preceding the current one.
    ///
    /// Both boundaries are derived from `now` alone. Deriving them by
    /// shifting an already-shifted boundary in place would silently
    /// move the window on reuse.
    pub fn previous(now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::days(2 * PERIOD_DAYS),
            end: now - Duration::days(PERIOD_DAYS),
        }
    }
}

/// Read-side capabilities the aggregator requires of the data store.
///
/// All windows are half-open: `start` inclusive, `end` exclusive.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Sum of `orders.total` for orders created within the window.
    async fn sum_order_totals(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Decimal, DataAccessError>;

    /// Count of distinct users with at least one order in the window.
    async fn count_users_with_orders(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, DataAccessError>;

    /// Count of products created within the window.
    async fn count_products_created(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, DataAccessError>;

    /// All-time count of orders in the given status.
    async fn count_orders_with_status(
        &self,
        status: OrderStatus,
    ) -> Result<i64, DataAccessError>;

    /// All-time order count.
    async fn count_orders(&self) -> Result<i64, DataAccessError>;

    /// All-time product count.
    async fn count_products(&self) -> Result<i64, DataAccessError>;
}

/// Computes [`DashboardStats`] from a [`StatsSource`].
///
/// Stateless between invocations; holds only the source handle.
pub struct StatsAggregator<S> {
    source: S,
}

impl<S: StatsSource> StatsAggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Compute dashboard statistics as of `now`.
    pub async fn compute(&self, now: DateTime<Utc>) -> Result<DashboardStats, DataAccessError> {
        let current = PeriodWindow::current(now);
        let previous = PeriodWindow::previous(now);

        // Window boundaries are fixed up front and every query is
        // read-only, so the whole fan-out can run concurrently.
        let (
            total_sales,
            previous_sales,
            active_users,
            previous_active_users,
            new_products,
            total_products,
            pending_orders,
            total_orders,
            delivered_orders,
        ) = tokio::try_join!(
            self.source.sum_order_totals(current.start, current.end),
            self.source.sum_order_totals(previous.start, previous.end),
            self.source.count_users_with_orders(current.start, current.end),
            self.source.count_users_with_orders(previous.start, previous.end),
            self.source.count_products_created(current.start, current.end),
            self.source.count_products(),
            self.source.count_orders_with_status(OrderStatus::Pending),
            self.source.count_orders(),
            self.source.count_orders_with_status(OrderStatus::Delivered),
        )?;

        Ok(DashboardStats {
            total_sales,
            sales_growth: sales_growth_percent(previous_sales, total_sales),
            active_users,
            user_growth: growth_percent(previous_active_users as f64, active_users as f64),
            total_products,
            new_products,
            new_orders: pending_orders,
            order_completion: completion_percent(delivered_orders, total_orders),
        })
    }
}

/// Percent change from `previous` to `current`, 0 when there is no
/// previous value to compare against. Unbounded otherwise: growth can
/// exceed 100% or go negative.
fn growth_percent(previous: f64, current: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}

/// Growth formula applied to monetary totals.
fn sales_growth_percent(previous: Decimal, current: Decimal) -> f64 {
    if previous > Decimal::ZERO {
        ((current - previous) / previous * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
    } else {
        0.0
    }
}

/// Share of `total` that `delivered` represents, in percent. 0 when
/// there are no orders at all.
fn completion_percent(delivered: i64, total: i64) -> f64 {
    if total > 0 {
        delivered as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    /// In-memory stand-in for the persistence layer.
    #[derive(Default)]
    struct FakeStore {
        /// (user, created_at, total, status)
        orders: Vec<(Uuid, DateTime<Utc>, Decimal, OrderStatus)>,
        /// created_at per product
        products: Vec<DateTime<Utc>>,
        fail: bool,
    }

    impl FakeStore {
        fn check(&self) -> Result<(), DataAccessError> {
            if self.fail {
                Err(DataAccessError("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl StatsSource for FakeStore {
        async fn sum_order_totals(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<Decimal, DataAccessError> {
            self.check()?;
            Ok(self
                .orders
                .iter()
                .filter(|(_, at, _, _)| *at >= start && *at < end)
                .map(|(_, _, total, _)| *total)
                .sum())
        }

        async fn count_users_with_orders(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<i64, DataAccessError> {
            self.check()?;
            let mut users: Vec<Uuid> = self
                .orders
                .iter()
                .filter(|(_, at, _, _)| *at >= start && *at < end)
                .map(|(user, _, _, _)| *user)
                .collect();
            users.sort();
            users.dedup();
            Ok(users.len() as i64)
        }

        async fn count_products_created(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<i64, DataAccessError> {
            self.check()?;
            Ok(self
                .products
                .iter()
                .filter(|at| **at >= start && **at < end)
                .count() as i64)
        }

        async fn count_orders_with_status(
            &self,
            status: OrderStatus,
        ) -> Result<i64, DataAccessError> {
            self.check()?;
            Ok(self.orders.iter().filter(|(_, _, _, s)| *s == status).count() as i64)
        }

        async fn count_orders(&self) -> Result<i64, DataAccessError> {
            self.check()?;
            Ok(self.orders.len() as i64)
        }

        async fn count_products(&self) -> Result<i64, DataAccessError> {
            self.check()?;
            Ok(self.products.len() as i64)
        }
    }

    fn day(n: i64) -> DateTime<Utc> {
        // "Day n" of an arbitrary fixed epoch, midday to stay clear of
        // boundary instants.
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::days(n)
    }

    fn order(
        user: Uuid,
        at: DateTime<Utc>,
        total: i64,
        status: OrderStatus,
    ) -> (Uuid, DateTime<Utc>, Decimal, OrderStatus) {
        (user, at, Decimal::from(total), status)
    }

    #[tokio::test]
    async fn test_empty_store_yields_all_zero_stats() {
        let aggregator = StatsAggregator::new(FakeStore::default());
        let stats = aggregator.compute(day(100)).await.unwrap();

        assert_eq!(stats, DashboardStats::default());
        assert!(stats.sales_growth.is_finite());
        assert!(stats.user_growth.is_finite());
    }

    #[test]
    fn test_previous_window_is_derived_independently_from_now() {
        let now = day(100);
        let current = PeriodWindow::current(now);
        let previous = PeriodWindow::previous(now);

        // previous.end must be exactly now - 30d, never now - 60d.
        assert_eq!(previous.end, now - Duration::days(30));
        assert_eq!(previous.start, now - Duration::days(60));
        // Deriving the previous window must not move the current one.
        assert_eq!(current, PeriodWindow::current(now));
        assert_eq!(current.start, previous.end);
    }

    #[tokio::test]
    async fn test_flat_sales_across_periods_report_zero_growth() {
        let user = Uuid::new_v4();
        let store = FakeStore {
            orders: vec![
                order(user, day(85), 50, OrderStatus::Delivered),
                order(user, day(90), 50, OrderStatus::Delivered),
                order(user, day(50), 100, OrderStatus::Delivered),
            ],
            ..Default::default()
        };

        let stats = StatsAggregator::new(store).compute(day(100)).await.unwrap();
        assert_eq!(stats.total_sales, Decimal::from(100));
        assert_eq!(stats.sales_growth, 0.0);
    }

    #[tokio::test]
    async fn test_growth_is_guarded_when_previous_period_is_empty() {
        let store = FakeStore {
            orders: vec![order(
                Uuid::new_v4(),
                day(95),
                200,
                OrderStatus::Pending,
            )],
            ..Default::default()
        };

        let stats = StatsAggregator::new(store).compute(day(100)).await.unwrap();
        assert_eq!(stats.total_sales, Decimal::from(200));
        assert_eq!(stats.sales_growth, 0.0);
        assert_eq!(stats.user_growth, 0.0);
    }

    #[tokio::test]
    async fn test_sales_growth_can_be_negative() {
        let user = Uuid::new_v4();
        let store = FakeStore {
            orders: vec![
                order(user, day(50), 100, OrderStatus::Delivered),
                order(user, day(90), 50, OrderStatus::Delivered),
            ],
            ..Default::default()
        };

        let stats = StatsAggregator::new(store).compute(day(100)).await.unwrap();
        assert_eq!(stats.sales_growth, -50.0);
    }

    #[tokio::test]
    async fn test_order_completion_is_delivered_share_of_all_time_orders() {
        let user = Uuid::new_v4();
        let mut orders = Vec::new();
        for i in 0..6 {
            orders.push(order(user, day(i * 10), 10, OrderStatus::Delivered));
        }
        for i in 0..4 {
            orders.push(order(user, day(i * 10 + 5), 10, OrderStatus::Pending));
        }
        let store = FakeStore {
            orders,
            ..Default::default()
        };

        let stats = StatsAggregator::new(store).compute(day(100)).await.unwrap();
        assert_eq!(stats.order_completion, 60.0);
        assert!((0.0..=100.0).contains(&stats.order_completion));
    }

    #[tokio::test]
    async fn test_new_products_counts_current_window_only() {
        let store = FakeStore {
            products: vec![day(10), day(40), day(95)],
            ..Default::default()
        };

        let stats = StatsAggregator::new(store).compute(day(100)).await.unwrap();
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.new_products, 1);
    }

    #[tokio::test]
    async fn test_active_users_are_distinct_per_window() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let store = FakeStore {
            orders: vec![
                // Current window: Alice twice, Bob once -> 2 active users.
                order(alice, day(85), 10, OrderStatus::Delivered),
                order(alice, day(90), 10, OrderStatus::Delivered),
                order(bob, day(95), 10, OrderStatus::Delivered),
                // Previous window: only Alice.
                order(alice, day(50), 10, OrderStatus::Delivered),
            ],
            ..Default::default()
        };

        let stats = StatsAggregator::new(store).compute(day(100)).await.unwrap();
        assert_eq!(stats.active_users, 2);
        assert_eq!(stats.user_growth, 100.0);
    }

    #[tokio::test]
    async fn test_pending_orders_are_counted_all_time() {
        let user = Uuid::new_v4();
        let store = FakeStore {
            orders: vec![
                // Pending well outside both windows still counts.
                order(user, day(1), 10, OrderStatus::Pending),
                order(user, day(95), 10, OrderStatus::Pending),
                order(user, day(96), 10, OrderStatus::Delivered),
            ],
            ..Default::default()
        };

        let stats = StatsAggregator::new(store).compute(day(100)).await.unwrap();
        assert_eq!(stats.new_orders, 2);
    }

    #[tokio::test]
    async fn test_source_failure_aborts_the_whole_computation() {
        let store = FakeStore {
            fail: true,
            ..Default::default()
        };

        let err = StatsAggregator::new(store)
            .compute(day(100))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_growth_percent_guards_division() {
        assert_eq!(growth_percent(0.0, 10.0), 0.0);
        assert_eq!(growth_percent(100.0, 150.0), 50.0);
        assert_eq!(growth_percent(100.0, 50.0), -50.0);
        assert_eq!(growth_percent(10.0, 30.0), 200.0);
    }

    #[test]
    fn test_completion_percent_bounds() {
        assert_eq!(completion_percent(0, 0), 0.0);
        assert_eq!(completion_percent(6, 10), 60.0);
        assert_eq!(completion_percent(10, 10), 100.0);
    }
}
