//! Gatehouse Authentication
//!
//! This crate provides the cryptographic half of the credential system:
//! one-way password hashing and signed session token management.

pub mod error;
pub mod jwt;
pub mod password;

pub use error::AuthError;
pub use jwt::{Claims, JwtManager};
pub use password::PasswordService;
