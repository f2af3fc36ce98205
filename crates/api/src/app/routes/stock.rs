use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::app::{dto, errors, Operations};

pub fn router() -> Router {
    Router::new()
        .route("/quantity", post(quantity))
        .route("/transfer", post(transfer))
        .route("/delivery", post(delivery))
}

pub async fn quantity(
    Extension(operations): Extension<Arc<Operations>>,
    body: Result<Json<dto::QuantityRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "BadRequest", rejection.body_text())
        }
    };

    let name = match body.parse() {
        Ok(name) => name,
        Err(e) => return errors::operation_error_to_response(e.into()),
    };

    match operations.quantity(&name).await {
        Ok(warehouse) => {
            (StatusCode::OK, Json(dto::warehouse_to_json(&warehouse))).into_response()
        }
        Err(e) => errors::operation_error_to_response(e),
    }
}

pub async fn transfer(
    Extension(operations): Extension<Arc<Operations>>,
    body: Result<Json<dto::TransferRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "BadRequest", rejection.body_text())
        }
    };

    let transfer = match body.parse() {
        Ok(transfer) => transfer,
        Err(e) => return errors::operation_error_to_response(e.into()),
    };

    match operations.transfer(transfer).await {
        Ok(transfer) => (StatusCode::OK, Json(dto::transfer_to_json(&transfer))).into_response(),
        Err(e) => errors::operation_error_to_response(e),
    }
}

pub async fn delivery(
    Extension(operations): Extension<Arc<Operations>>,
) -> axum::response::Response {
    match operations.settle_deliveries().await {
        Ok(settled) => (StatusCode::OK, Json(dto::settlement_to_json(settled))).into_response(),
        Err(e) => errors::operation_error_to_response(e),
    }
}
