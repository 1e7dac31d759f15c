//! Order entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::OrderStatus;
use rust_decimal::Decimal;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Database row mapping for the orders table.
#[derive(Debug, Clone, FromRow)]
pub struct OrderEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderEntity {
    /// Build the domain model, attaching items loaded separately.
    pub fn into_model(self, items: Vec<OrderItemEntity>) -> domain::models::Order {
        domain::models::Order {
            id: self.id,
            user_id: self.user_id,
            total: self.total,
            // Status values are constrained by a CHECK in the schema;
            // anything unknown is treated as still pending.
            status: OrderStatus::from_str(&self.status).unwrap_or(OrderStatus::Pending),
            created_at: self.created_at,
            updated_at: self.updated_at,
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<OrderEntity> for domain::models::Order {
    fn from(entity: OrderEntity) -> Self {
        entity.into_model(Vec::new())
    }
}

/// Database row mapping for the order_items table.
#[derive(Debug, Clone, FromRow)]
pub struct OrderItemEntity {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl From<OrderItemEntity> for domain::models::OrderItem {
    fn from(entity: OrderItemEntity) -> Self {
        Self {
            id: entity.id,
            order_id: entity.order_id,
            product_id: entity.product_id,
            quantity: entity.quantity,
            unit_price: entity.unit_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(status: &str) -> OrderEntity {
        let now = Utc::now();
        OrderEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            total: Decimal::from(100),
            status: status.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_order_entity_maps_status() {
        let model: domain::models::Order = entity("delivered").into();
        assert_eq!(model.status, OrderStatus::Delivered);
    }

    #[test]
    fn test_order_entity_falls_back_to_pending_on_unknown_status() {
        let model: domain::models::Order = entity("archived").into();
        assert_eq!(model.status, OrderStatus::Pending);
    }
}
