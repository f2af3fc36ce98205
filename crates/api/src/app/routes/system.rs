use axum::{http::StatusCode, routing::get, Router};

pub fn router() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
}

async fn home() -> &'static str {
    "Warehouse API is running!"
}

async fn health() -> StatusCode {
    StatusCode::OK
}
