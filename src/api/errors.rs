use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::{AppError, ValidationReason};

/// Single boundary translating AppError into HTTP responses.
///
/// Validation failures carry the offending field and reason so clients
/// can render them; store-side failures are logged here and replaced
/// with generic bodies so driver internals never reach the client.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation { field, reason } => {
                let mut body = serde_json::json!({
                    "error": self.to_string(),
                    "field": field,
                    "reason": reason.tag(),
                });
                if let ValidationReason::NotInEnum { allowed } = reason {
                    body["allowed"] = serde_json::json!(allowed);
                }
                (StatusCode::BAD_REQUEST, body)
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, serde_json::json!({ "error": msg }))
            }
            AppError::Auth(msg) => {
                (StatusCode::UNAUTHORIZED, serde_json::json!({ "error": msg }))
            }
            AppError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, serde_json::json!({ "error": msg }))
            }
            AppError::Connection(msg) => {
                tracing::error!("store unreachable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    serde_json::json!({ "error": "store unavailable" }),
                )
            }
            AppError::Store(msg) => {
                tracing::error!("store error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": "internal server error" }),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": "internal server error" }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn error_kinds_map_to_statuses() {
        assert_eq!(
            status_of(AppError::required("title")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Auth("x".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Forbidden("x".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::Connection("x".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(AppError::Store("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
