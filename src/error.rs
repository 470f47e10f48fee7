use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as RespJson, Response},
};
use thiserror::Error;

/// Request-level errors, recovered at the API boundary. Every handler returns
/// `Result<_, ApiError>`; nothing here should ever crash the process.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input (bad timestamp, bad time-of-day format).
    #[error("{0}")]
    Validation(String),

    /// Bad credentials or a missing/invalid/expired token.
    #[error("{0}")]
    Unauthorized(String),

    /// Admin API key mismatch.
    #[error("Unauthorized")]
    Forbidden,

    /// Duplicate username/email or an already-booked slot.
    #[error("{0}")]
    Conflict(String),

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(ref e) => {
                tracing::error!("database error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Internal(ref msg) => {
                tracing::error!("internal error: {msg}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // The venue-create endpoint reports auth failure under "message",
        // everything else under "status".
        let key = match self {
            ApiError::Forbidden => "message",
            _ => "status",
        };
        let message = match self {
            ApiError::Database(_) | ApiError::Internal(_) => "Internal server error".to_string(),
            ref other => other.to_string(),
        };

        let mut body = serde_json::Map::new();
        body.insert(key.to_string(), serde_json::Value::String(message));
        body.insert("status_code".to_string(), status.as_u16().into());
        (status, RespJson(serde_json::Value::Object(body))).into_response()
    }
}

/// Maps a constraint violation with the given SQLSTATE code to `conflict`,
/// leaving every other failure as a generic database error.
pub fn conflict_on(err: sqlx::Error, code: &str, conflict: &str) -> ApiError {
    match err {
        sqlx::Error::Database(ref db) if db.code().as_deref() == Some(code) => {
            ApiError::Conflict(conflict.to_string())
        }
        other => ApiError::Database(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (
                ApiError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Unauthorized("no".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (ApiError::Forbidden, StatusCode::FORBIDDEN),
            (
                ApiError::Conflict("taken".into()),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Internal("oops".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn unique_violation_becomes_conflict() {
        // RowNotFound carries no SQLSTATE, so it must stay a database error.
        let err = conflict_on(sqlx::Error::RowNotFound, "23505", "taken");
        assert!(matches!(err, ApiError::Database(_)));
    }
}
