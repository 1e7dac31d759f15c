//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod order;
pub mod product;
pub mod user;

pub use order::{OrderEntity, OrderItemEntity};
pub use product::{ProductEntity, RatingEntity};
pub use user::UserEntity;
