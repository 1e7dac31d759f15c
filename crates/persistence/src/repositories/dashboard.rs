//! Dashboard statistics source backed by PostgreSQL.
//!
//! Implements the domain's [`StatsSource`] capability trait with the
//! small fixed set of scalar queries the aggregator needs. No joins
//! into full entities here; every method is a single COUNT or SUM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::models::OrderStatus;
use domain::services::{DataAccessError, StatsSource};
use rust_decimal::Decimal;
use sqlx::PgPool;

/// Repository exposing the dashboard's read-side queries.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsSource for DashboardRepository {
    async fn sum_order_totals(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Decimal, DataAccessError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(total), 0)
            FROM orders
            WHERE created_at >= $1 AND created_at < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn count_users_with_orders(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, DataAccessError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT user_id)
            FROM orders
            WHERE created_at >= $1 AND created_at < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_products_created(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, DataAccessError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM products
            WHERE created_at >= $1 AND created_at < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_orders_with_status(
        &self,
        status: OrderStatus,
    ) -> Result<i64, DataAccessError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM orders WHERE status = $1
            "#,
        )
        .bind(status.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_orders(&self) -> Result<i64, DataAccessError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM orders
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_products(&self) -> Result<i64, DataAccessError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM products
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
