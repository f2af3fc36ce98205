use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockyard_infra::OperationError;

/// Map an operation failure to its wire representation.
///
/// Storage failures never reach the caller in detail; they are logged here
/// and surfaced as an opaque server error.
pub fn operation_error_to_response(err: OperationError) -> axum::response::Response {
    match err {
        OperationError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "BadRequest", msg),
        OperationError::TransferRejected(msg) => {
            json_error(StatusCode::BAD_REQUEST, "TransferFailed", msg)
        }
        OperationError::InsufficientQuantity {
            warehouse,
            available,
            requested,
        } => json_error(
            StatusCode::BAD_REQUEST,
            "TransferFailed",
            format!(
                "Insufficient quantity available in '{warehouse}'. \
                 Available: {available}, Requested: {requested}"
            ),
        ),
        OperationError::NotFound { name } => not_found(&name),
        OperationError::ConflictExhausted { .. } | OperationError::Store(_) => {
            tracing::error!(error = %err, "operation failed in the storage layer");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "ServerError",
                "An internal storage error occurred.",
            )
        }
    }
}

pub fn not_found(requested_name: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(json!({
            "error": "NotFound",
            "message": format!("Warehouse '{requested_name}' was not found."),
            "requestedWarehouseName": requested_name,
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
