use axum::{
    extract::{Extension, Json},
    response::Json as RespJson,
    routing::post,
    Router,
};
use serde_json::{json, Value};

use crate::auth::{hash_password, issue_token, verify_password};
use crate::error::{conflict_on, ApiError};
use crate::model::user::{LoginRequest, SignupRequest, User};
use crate::state::AppState;

// Buat router khusus auth
pub fn auth_router() -> Router {
    Router::new()
        .route("/api/signup", post(signup))
        .route("/api/login", post(login))
}

async fn signup(
    Extension(state): Extension<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<RespJson<Value>, ApiError> {
    let password_hash = hash_password(&payload.password)?;

    let user_id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&payload.username)
    .bind(&payload.email)
    .bind(&password_hash)
    .fetch_one(&state.pool)
    .await
    // 23505 = unique_violation on username or email
    .map_err(|e| conflict_on(e, "23505", "Username or email already exists"))?;

    tracing::info!(user_id, username = %payload.username, "user registered");

    Ok(RespJson(json!({
        "status": "Account successfully created",
        "status_code": 200,
        "user_id": user_id,
    })))
}

async fn login(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<RespJson<Value>, ApiError> {
    let user: Option<User> = sqlx::query_as(
        "SELECT id, username, email, password_hash, is_admin FROM users WHERE username = $1",
    )
    .bind(&payload.username)
    .fetch_optional(&state.pool)
    .await?;

    // Same response for unknown username and wrong password, so the endpoint
    // cannot be used to enumerate accounts.
    let user = match user {
        Some(user) if verify_password(&payload.password, &user.password_hash) => user,
        _ => {
            return Err(ApiError::Unauthorized(
                "Incorrect username/password provided. Please retry".to_string(),
            ))
        }
    };

    let access_token = issue_token(user.id, &state.config.jwt_secret)?;

    tracing::info!(user_id = user.id, "login successful");

    Ok(RespJson(json!({
        "status": "Login successful",
        "status_code": 200,
        "user_id": user.id,
        "access_token": access_token,
    })))
}
