//! Domain models for the storefront admin backend.

pub mod dashboard;
pub mod order;
pub mod product;
pub mod user;

pub use dashboard::DashboardStats;
pub use order::{
    CreateOrderItem, CreateOrderRequest, ListOrdersQuery, Order, OrderItem, OrderStatus,
    UpdateOrderStatusRequest,
};
pub use product::{
    CreateProductRequest, ListProductsQuery, Product, Rating, UpdateProductRequest,
};
pub use user::{CreateUserRequest, ListUsersQuery, User};
