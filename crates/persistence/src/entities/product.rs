//! Product and rating entities (database row mappings).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the products table.
#[derive(Debug, Clone, FromRow)]
pub struct ProductEntity {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductEntity {
    /// Build the domain model, attaching ratings loaded separately.
    pub fn into_model(self, ratings: Vec<RatingEntity>) -> domain::models::Product {
        domain::models::Product {
            id: self.id,
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            image: self.image,
            created_at: self.created_at,
            updated_at: self.updated_at,
            ratings: ratings.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ProductEntity> for domain::models::Product {
    fn from(entity: ProductEntity) -> Self {
        entity.into_model(Vec::new())
    }
}

/// Database row mapping for the product_ratings table.
#[derive(Debug, Clone, FromRow)]
pub struct RatingEntity {
    pub id: Uuid,
    pub product_id: Uuid,
    pub rate: f32,
    pub created_at: DateTime<Utc>,
}

impl From<RatingEntity> for domain::models::Rating {
    fn from(entity: RatingEntity) -> Self {
        Self {
            id: entity.id,
            product_id: entity.product_id,
            rate: entity.rate,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_entity_into_model_attaches_ratings() {
        let product_id = Uuid::new_v4();
        let now = Utc::now();
        let entity = ProductEntity {
            id: product_id,
            title: "Desk Lamp".to_string(),
            description: String::new(),
            price: Decimal::new(2499, 2),
            category: "home".to_string(),
            image: String::new(),
            created_at: now,
            updated_at: now,
        };
        let rating = RatingEntity {
            id: Uuid::new_v4(),
            product_id,
            rate: 4.0,
            created_at: now,
        };

        let model = entity.into_model(vec![rating]);
        assert_eq!(model.id, product_id);
        assert_eq!(model.ratings.len(), 1);
        assert_eq!(model.ratings[0].rate, 4.0);
    }
}
