//! Token-guarded user listing routes

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::error::ApiError;
use crate::state::AppState;

use super::auth::{RequireAdmin, RequireAuth};
use super::types::UserResponse;

/// GET /users (any authenticated caller)
async fn list_users(
    _auth: RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.db.list_users().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/:id (admin only)
async fn get_user(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .db
        .get_user_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;

    Ok(Json(user.into()))
}

/// Create user routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
}

#[cfg(test)]
mod tests {
    use crate::routes::create_router;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use gatehouse_auth::{JwtManager, PasswordService};
    use gatehouse_db::{Database, NewUser};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn test_state() -> AppState {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.insert_role("angel").await.unwrap();
        db.insert_role("admin").await.unwrap();

        AppState::new(
            db,
            Arc::new(JwtManager::new("test-secret-key", 24)),
            Arc::new(PasswordService::new(8, 1, 1).unwrap()),
        )
    }

    async fn seed_user(state: &AppState, username: &str, role_name: &str) -> i64 {
        let password_hash = state.passwords.hash("1234").unwrap();
        state
            .db
            .insert_user(NewUser {
                username: username.to_string(),
                password_hash,
                role_name: role_name.to_string(),
            })
            .await
            .unwrap()
            .id
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn send(router: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn listing_requires_a_token() {
        let state = test_state().await;
        let app = create_router(state, None);

        let (status, _) = send(app.clone(), get_request("/users", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(app, get_request("/users", Some("not-a-token"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn listing_returns_public_fields_for_any_valid_token() {
        let state = test_state().await;
        let id = seed_user(&state, "sue", "angel").await;
        let token = state.jwt.generate_token(id, "sue", "angel").unwrap();
        let app = create_router(state, None);

        let (status, body) = send(app, get_request("/users", Some(&token))).await;

        assert_eq!(status, StatusCode::OK);
        let users = body.as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["username"], "sue");
        assert_eq!(users[0]["role_name"], "angel");
        assert!(users[0].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn user_detail_is_admin_only() {
        let state = test_state().await;
        let id = seed_user(&state, "sue", "angel").await;
        let app = create_router(state.clone(), None);

        let angel_token = state.jwt.generate_token(id, "sue", "angel").unwrap();
        let (status, _) = send(
            app.clone(),
            get_request(&format!("/users/{}", id), Some(&angel_token)),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let admin_id = seed_user(&state, "bob", "admin").await;
        let admin_token = state.jwt.generate_token(admin_id, "bob", "admin").unwrap();
        let (status, body) = send(
            app.clone(),
            get_request(&format!("/users/{}", id), Some(&admin_token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "sue");

        let (status, _) = send(app, get_request("/users/9999", Some(&admin_token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
