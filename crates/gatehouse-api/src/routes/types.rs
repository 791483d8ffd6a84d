//! Request/Response DTOs for the credential API

use gatehouse_db::User;
use serde::{Deserialize, Serialize};

// ==================== Auth Types ====================

/// Registration request
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    /// Validated against the role reference table before the handler runs
    #[serde(default)]
    pub role_name: Option<String>,
}

/// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

// ==================== User Types ====================

/// Public view of a user record (never carries the password hash)
#[derive(Serialize)]
pub struct UserResponse {
    pub user_id: i64,
    pub username: String,
    pub role_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            role_name: user.role_name,
        }
    }
}
