//! Persistence layer for the storefront admin backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations, including the dashboard stats source

pub mod db;
pub mod entities;
pub mod repositories;
