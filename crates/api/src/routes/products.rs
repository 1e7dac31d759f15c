//! Product catalog admin routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::{CreateProductRequest, ListProductsQuery, Product, UpdateProductRequest};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::ProductRepository;

/// Paged product listing response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListProductsResponse {
    pub products: Vec<Product>,
    pub total: i64,
}

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let price = Decimal::from_f64(request.price)
        .ok_or_else(|| ApiError::Validation("price is not a representable amount".to_string()))?;

    let repo = ProductRepository::new(state.pool.clone());
    let product = repo
        .create(
            &request.title,
            &request.description,
            price,
            &request.category,
            request.image.as_deref().unwrap_or(""),
            request.rating,
        )
        .await?;

    info!(
        product_id = %product.id,
        category = %product.category,
        "Created product"
    );

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/v1/products
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ProductRepository::new(state.pool.clone());
    let (products, total) = repo.list(&query).await?;

    Ok((StatusCode::OK, Json(ListProductsResponse { products, total })))
}

/// GET /api/v1/products/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ProductRepository::new(state.pool.clone());
    let categories = repo.list_categories().await?;

    Ok((StatusCode::OK, Json(categories)))
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ProductRepository::new(state.pool.clone());
    let product = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok((StatusCode::OK, Json(product)))
}

/// PUT /api/v1/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let price = request
        .price
        .map(|p| {
            Decimal::from_f64(p).ok_or_else(|| {
                ApiError::Validation("price is not a representable amount".to_string())
            })
        })
        .transpose()?;

    let repo = ProductRepository::new(state.pool.clone());
    let product = repo
        .update(
            id,
            request.title.as_deref(),
            request.description.as_deref(),
            price,
            request.category.as_deref(),
            request.image.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    info!(product_id = %product.id, "Updated product");

    Ok((StatusCode::OK, Json(product)))
}

/// DELETE /api/v1/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ProductRepository::new(state.pool.clone());
    let deleted = repo.delete(id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Product not found".to_string()));
    }

    info!(product_id = %id, "Deleted product");

    Ok(StatusCode::NO_CONTENT)
}
