//! Gatehouse Database Layer
//!
//! This crate provides the database abstraction layer for Gatehouse,
//! using SQLite via sqlx for persistence of user records and the
//! role reference table.

pub mod error;
pub mod models;
pub mod repository;
pub mod utils;

pub use error::DbError;
pub use models::*;
pub use repository::Database;

/// Re-export sqlx types for convenience
pub use sqlx::SqlitePool;
