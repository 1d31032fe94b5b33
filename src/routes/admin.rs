use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
};

use crate::{
    dto::products::{CreateProductRequest, UpdateProductRequest},
    error::{AppResult, ErrorBody},
    extract::AppJson,
    middleware::admin::AdminAuth,
    models::Product,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", post(create_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
}

#[utoipa::path(
    post,
    path = "/admin/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid body", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
    ),
    security(("admin_secret" = [])),
    tag = "Admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    _admin: AdminAuth,
    AppJson(payload): AppJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = product_service::create_product(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/admin/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Invalid body", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Product not found or deleted", body = ErrorBody),
    ),
    security(("admin_secret" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateProductRequest>,
) -> AppResult<Json<Product>> {
    let product = product_service::update_product(&state, &id, payload).await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/admin/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product soft-deleted"),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Product not found or already deleted", body = ErrorBody),
    ),
    security(("admin_secret" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    product_service::delete_product(&state, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
