use axum::{
    Router,
    routing::{get, post},
};

use crate::{error::AppError, state::AppState};

pub mod admin;
pub mod doc;
pub mod health;
pub mod orders;
pub mod products;

/// Public storefront API, mounted under `/api/v1`.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .route("/checkout", post(orders::checkout))
        .nest("/orders", orders::router())
}

/// Full application router with state applied. Cross-cutting tower layers are
/// added by the binary.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", create_api_router())
        .nest("/admin", admin::router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
