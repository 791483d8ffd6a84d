//! Credential endpoints and authentication extractors

use axum::{
    Json, Router,
    extract::{FromRef, FromRequestParts, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    routing::post,
};
use gatehouse_auth::Claims;
use gatehouse_db::NewUser;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

use super::guard;
use super::types::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};

/// Role name that unlocks the admin-only endpoints
const ADMIN_ROLE: &str = "admin";

// ==================== Auth Extractors ====================

/// Authenticated caller identity decoded from a bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub role: String,
}

impl AuthUser {
    /// Create from JWT claims
    fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.subject_id(),
            username: claims.username.clone(),
            role: claims.role.clone(),
        }
    }
}

/// Extractor for authenticated user (required)
pub struct RequireAuth(pub AuthUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        if !auth_header.starts_with("Bearer ") {
            return Err(ApiError::Unauthorized);
        }

        let token = &auth_header[7..];
        let claims = app_state
            .jwt
            .validate_token(token)
            .map_err(|_| ApiError::Unauthorized)?;
        let user = AuthUser::from_claims(&claims);

        debug!("Authenticated user: {} ({})", user.username, user.role);
        Ok(RequireAuth(user))
    }
}

/// Extractor for admin user (required)
pub struct RequireAdmin(pub AuthUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;

        if user.role != ADMIN_ROLE {
            return Err(ApiError::Forbidden);
        }

        Ok(RequireAdmin(user))
    }
}

// ==================== Input Validation ====================

/// Maximum allowed username length
const MAX_USERNAME_LENGTH: usize = 64;
/// Maximum allowed password length (prevent DoS with very large passwords)
const MAX_PASSWORD_LENGTH: usize = 256;

/// Validate username format and length
fn validate_username(username: &str) -> Result<(), ApiError> {
    if username.is_empty() {
        return Err(ApiError::BadRequest("Username cannot be empty".to_string()));
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Username exceeds maximum length of {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    // Only allow alphanumeric characters, underscores, and hyphens
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApiError::BadRequest(
            "Username can only contain alphanumeric characters, underscores, and hyphens"
                .to_string(),
        ));
    }
    Ok(())
}

/// Validate password length
///
/// No minimum is enforced; the caller owns password strength policy.
fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.is_empty() {
        return Err(ApiError::BadRequest("Password cannot be empty".to_string()));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Password exceeds maximum length of {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

// ==================== Auth Routes ====================

/// POST /register
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    // Unknown roles are rejected before any store write
    let role_name = guard::validate_role_name(&state.db, request.role_name.as_deref()).await?;

    validate_username(&request.username)?;
    validate_password(&request.password)?;

    debug!("Registering user: {}", request.username);

    let password_hash = state.passwords.hash(&request.password)?;

    let user = state
        .db
        .insert_user(NewUser {
            username: request.username,
            password_hash,
            role_name,
        })
        .await?;

    metrics::counter!("gatehouse_registrations_total").increment(1);
    info!("Registered user: {} ({})", user.username, user.role_name);

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /login
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    debug!("Login attempt for user: {}", request.username);

    let user = guard::check_username_exists(&state.db, &request.username).await?;

    if !state.passwords.verify(&request.password, &user.password_hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    let token = state
        .jwt
        .generate_token(user.id, &user.username, &user.role_name)?;

    metrics::counter!("gatehouse_logins_total").increment(1);
    info!("User {} logged in", user.username);

    Ok(Json(LoginResponse {
        message: format!("{} is back!", user.username),
        token,
    }))
}

/// Create auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
