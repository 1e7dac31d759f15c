//! Order repository for database operations.

use domain::models::{ListOrdersQuery, Order, OrderStatus};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{OrderEntity, OrderItemEntity};

/// An order line priced at creation time.
#[derive(Debug, Clone)]
pub struct OrderLineInput {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Repository for order database operations.
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an order with its items in one transaction.
    ///
    /// The stored total is computed here from the priced lines so a
    /// partially inserted order can never be observed.
    pub async fn create(
        &self,
        user_id: Uuid,
        lines: &[OrderLineInput],
    ) -> Result<Order, sqlx::Error> {
        let total: Decimal = lines
            .iter()
            .map(|line| line.unit_price * Decimal::from(line.quantity))
            .sum();

        let mut tx = self.pool.begin().await?;

        let entity = sqlx::query_as::<_, OrderEntity>(
            r#"
            INSERT INTO orders (user_id, total, status)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, total, status, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(total)
        .bind(OrderStatus::Pending.to_string())
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let item = sqlx::query_as::<_, OrderItemEntity>(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                RETURNING id, order_id, product_id, quantity, unit_price
                "#,
            )
            .bind(entity.id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .fetch_one(&mut *tx)
            .await?;
            items.push(item);
        }

        tx.commit().await?;

        Ok(entity.into_model(items))
    }

    /// Find an order by ID, with its items.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, sqlx::Error> {
        let entity = sqlx::query_as::<_, OrderEntity>(
            r#"
            SELECT id, user_id, total, status, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(entity) = entity else {
            return Ok(None);
        };

        let items = self.items_for(entity.id).await?;
        Ok(Some(entity.into_model(items)))
    }

    /// List orders with optional status filter, newest first.
    ///
    /// Returns `(orders, total)` where total ignores pagination.
    pub async fn list(&self, query: &ListOrdersQuery) -> Result<(Vec<Order>, i64), sqlx::Error> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(50).clamp(1, 100);
        let offset = (page - 1) * per_page;
        let status = query.status.map(|s| s.to_string());

        let entities = sqlx::query_as::<_, OrderEntity>(
            r#"
            SELECT id, user_id, total, status, created_at, updated_at
            FROM orders
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status.as_deref())
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM orders
            WHERE ($1::text IS NULL OR status = $1)
            "#,
        )
        .bind(status.as_deref())
        .fetch_one(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(entities.len());
        for entity in entities {
            let items = self.items_for(entity.id).await?;
            orders.push(entity.into_model(items));
        }

        Ok((orders, total))
    }

    /// Update an order's status. Returns the updated order if it exists.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, sqlx::Error> {
        let entity = sqlx::query_as::<_, OrderEntity>(
            r#"
            UPDATE orders
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, total, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .fetch_optional(&self.pool)
        .await?;

        let Some(entity) = entity else {
            return Ok(None);
        };

        let items = self.items_for(entity.id).await?;
        Ok(Some(entity.into_model(items)))
    }

    async fn items_for(&self, order_id: Uuid) -> Result<Vec<OrderItemEntity>, sqlx::Error> {
        sqlx::query_as::<_, OrderItemEntity>(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_line_total_arithmetic() {
        let lines = [
            OrderLineInput {
                product_id: Uuid::new_v4(),
                quantity: 2,
                unit_price: Decimal::new(1050, 2), // 10.50
            },
            OrderLineInput {
                product_id: Uuid::new_v4(),
                quantity: 1,
                unit_price: Decimal::new(500, 2), // 5.00
            },
        ];
        let total: Decimal = lines
            .iter()
            .map(|line| line.unit_price * Decimal::from(line.quantity))
            .sum();
        assert_eq!(total, Decimal::new(2600, 2)); // 26.00
    }
}
