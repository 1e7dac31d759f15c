//! Domain layer for the storefront admin backend.
//!
//! This crate contains:
//! - Domain models (Product, User, Order, DashboardStats)
//! - The period-comparison statistics aggregator
//! - The `StatsSource` capability trait implemented by the persistence layer

pub mod models;
pub mod services;
