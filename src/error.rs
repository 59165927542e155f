use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Malformed stored data: {0}")]
    MalformedStoredData(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Machine-readable code sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "NOT_FOUND",
            Error::PermissionDenied(_) => "PERMISSION_DENIED",
            Error::InvalidInput(_) | Error::Validation(_) => "INVALID_INPUT",
            Error::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            Error::Timeout(_) => "TIMEOUT",
            Error::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Error::MalformedStoredData(_) => "MALFORMED_STORED_DATA",
            Error::Config(_) | Error::Database(_) | Error::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::PermissionDenied(_) => StatusCode::UNAUTHORIZED,
            Error::InvalidInput(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            Error::NotFound(msg) | Error::PermissionDenied(msg) | Error::InvalidInput(msg) => {
                msg.clone()
            }
            Error::Validation(err) => err.to_string(),
            other => {
                tracing::error!(error = %other, "Request failed");
                "An unexpected error occurred".to_string()
            }
        };

        let body = Json(json!({ "error": { "code": self.code(), "message": message } }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db) if is_integrity_violation(db.code().as_deref()) => {
                Error::ConstraintViolation(db.message().to_string())
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Error::StoreUnavailable(err.to_string()),
            other => Error::Database(other),
        }
    }
}

// SQLSTATE class 23: integrity constraint violation.
fn is_integrity_violation(code: Option<&str>) -> bool {
    matches!(code, Some(c) if c.starts_with("23"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_becomes_not_found() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn pool_failures_become_store_unavailable() {
        let err: Error = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, Error::StoreUnavailable(_)));

        let err: Error = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, Error::StoreUnavailable(_)));
    }

    #[test]
    fn io_failure_becomes_store_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: Error = sqlx::Error::Io(io).into();
        assert_eq!(err.code(), "STORE_UNAVAILABLE");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn integrity_codes() {
        assert!(is_integrity_violation(Some("23505")));
        assert!(is_integrity_violation(Some("23514")));
        assert!(!is_integrity_violation(Some("42P01")));
        assert!(!is_integrity_violation(None));
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            Error::PermissionDenied("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            Error::InvalidInput("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Timeout("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::MalformedStoredData("x".into()).code(),
            "MALFORMED_STORED_DATA"
        );
    }
}
