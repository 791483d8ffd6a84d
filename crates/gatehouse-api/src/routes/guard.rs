//! Pre-handler validation guards
//!
//! Each guard either resolves context the handler needs or rejects the
//! request before the handler body runs.

use gatehouse_db::{Database, User};
use tracing::debug;

use crate::error::ApiError;

/// Maximum allowed role name length
const MAX_ROLE_NAME_LENGTH: usize = 32;

/// Validate a proposed role name against the role reference table
///
/// Returns the canonical (trimmed) name on success. Missing, blank,
/// oversized, and unknown names all fail before anything is written.
pub async fn validate_role_name(
    db: &Database,
    proposed: Option<&str>,
) -> Result<String, ApiError> {
    let role_name = proposed.map(str::trim).unwrap_or_default();

    if role_name.is_empty() {
        return Err(ApiError::BadRequest("Role name is required".to_string()));
    }
    if role_name.len() > MAX_ROLE_NAME_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Role name exceeds maximum length of {} characters",
            MAX_ROLE_NAME_LENGTH
        )));
    }
    if !db.role_exists(role_name).await? {
        return Err(ApiError::BadRequest(format!(
            "Role '{}' does not exist",
            role_name
        )));
    }

    Ok(role_name.to_string())
}

/// Resolve a username to its stored record
///
/// A miss reports the same generic credential failure as a wrong password,
/// so callers cannot probe which usernames exist.
pub async fn check_username_exists(db: &Database, username: &str) -> Result<User, ApiError> {
    match db.get_user_by_username(username).await? {
        Some(user) => Ok(user),
        None => {
            debug!("Login attempt for unknown username: {}", username);
            Err(ApiError::InvalidCredentials)
        }
    }
}
