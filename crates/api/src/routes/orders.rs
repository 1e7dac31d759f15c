//! Order admin routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::{CreateOrderRequest, ListOrdersQuery, Order, UpdateOrderStatusRequest};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_order_created;
use persistence::repositories::order::OrderLineInput;
use persistence::repositories::{OrderRepository, ProductRepository, UserRepository};

/// Paged order listing response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListOrdersResponse {
    pub orders: Vec<Order>,
    pub total: i64,
}

/// POST /api/v1/orders
///
/// Creates a pending order. Lines are priced from the catalog at
/// creation time; later product price changes do not touch the order.
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let user_repo = UserRepository::new(state.pool.clone());
    if user_repo.find_by_id(request.user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let product_repo = ProductRepository::new(state.pool.clone());
    let mut lines = Vec::with_capacity(request.items.len());
    for item in &request.items {
        let product = product_repo
            .find_by_id(item.product_id)
            .await?
            .ok_or_else(|| {
                ApiError::Validation(format!("Unknown product {}", item.product_id))
            })?;
        lines.push(OrderLineInput {
            product_id: product.id,
            quantity: item.quantity,
            unit_price: product.price,
        });
    }

    let repo = OrderRepository::new(state.pool.clone());
    let order = repo.create(request.user_id, &lines).await?;
    record_order_created();

    info!(
        order_id = %order.id,
        user_id = %order.user_id,
        total = %order.total,
        items = order.items.len(),
        "Created order"
    );

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/v1/orders
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = OrderRepository::new(state.pool.clone());
    let (orders, total) = repo.list(&query).await?;

    Ok((StatusCode::OK, Json(ListOrdersResponse { orders, total })))
}

/// GET /api/v1/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = OrderRepository::new(state.pool.clone());
    let order = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    Ok((StatusCode::OK, Json(order)))
}

/// PATCH /api/v1/orders/{id}/status
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = OrderRepository::new(state.pool.clone());
    let order = repo
        .update_status(id, request.status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    info!(order_id = %order.id, status = %order.status, "Updated order status");

    Ok((StatusCode::OK, Json(order)))
}
