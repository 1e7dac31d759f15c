//! Product catalog domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Product domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Customer ratings attached to this product, newest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ratings: Vec<Rating>,
}

/// A single customer rating for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Rating {
    pub id: Uuid,
    pub product_id: Uuid,
    /// Rating value, constrained to [0, 5] at creation.
    pub rate: f32,
    pub created_at: DateTime<Utc>,
}

/// Request to create a new product.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,

    #[validate(length(min = 1, max = 100, message = "category must be 1-100 characters"))]
    pub category: String,

    #[validate(url(message = "image must be a valid URL"))]
    #[serde(default)]
    pub image: Option<String>,

    /// Optional initial rating, as submitted by the storefront seed flow.
    #[validate(range(min = 0.0, max = 5.0, message = "rating must be in [0, 5]"))]
    #[serde(default)]
    pub rating: Option<f32>,
}

/// Request to update an existing product. All fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,

    #[validate(length(min = 1, max = 100, message = "category must be 1-100 characters"))]
    pub category: Option<String>,

    #[validate(url(message = "image must be a valid URL"))]
    pub image: Option<String>,
}

/// Query parameters for listing products.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListProductsQuery {
    pub category: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_product_request_valid() {
        let request = CreateProductRequest {
            title: "Mechanical Keyboard".to_string(),
            description: "Tenkeyless, brown switches".to_string(),
            price: 89.99,
            category: "electronics".to_string(),
            image: Some("https://cdn.example.com/kb.jpg".to_string()),
            rating: Some(4.5),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_product_request_rejects_negative_price() {
        let request = CreateProductRequest {
            title: "Keyboard".to_string(),
            description: String::new(),
            price: -1.0,
            category: "electronics".to_string(),
            image: None,
            rating: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_product_request_rejects_out_of_range_rating() {
        let request = CreateProductRequest {
            title: "Keyboard".to_string(),
            description: String::new(),
            price: 10.0,
            category: "electronics".to_string(),
            image: None,
            rating: Some(5.5),
        };
        assert!(request.validate().is_err());
    }
}
