use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    error::{AppResult, ErrorBody},
    models::Product,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses(
        (status = 200, description = "Active products", body = Vec<Product>),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    ),
    tag = "Products"
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let items = product_service::list_products(&state).await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = Product),
        (status = 404, description = "Product not found or deleted", body = ErrorBody),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = product_service::get_product(&state, &id).await?;
    Ok(Json(product))
}
