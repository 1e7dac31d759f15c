//! Repository implementations for database operations.

pub mod dashboard;
pub mod order;
pub mod product;
pub mod user;

pub use dashboard::DashboardRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use user::UserRepository;
