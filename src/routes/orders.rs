use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::orders::{CheckoutRequest, ConfirmOrderRequest, OrderPasscodeQuery},
    error::{AppResult, ErrorBody},
    extract::{AppJson, AppQuery},
    models::OrderWithDetails,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get_order))
        .route("/{id}/confirm", post(confirm_order))
}

#[utoipa::path(
    post,
    path = "/api/v1/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order created; the passcode is shown only here", body = OrderWithDetails),
        (status = 400, description = "Invalid body", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    ),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CheckoutRequest>,
) -> AppResult<Json<OrderWithDetails>> {
    let order = order_service::checkout(&state, payload).await?;
    Ok(Json(order))
}

#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/confirm",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    request_body = ConfirmOrderRequest,
    responses(
        (status = 200, description = "Order marked paid", body = OrderWithDetails),
        (status = 400, description = "Invalid body, no passcode, already paid or amount mismatch", body = ErrorBody),
        (status = 401, description = "Passcode mismatch", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody),
    ),
    tag = "Orders"
)]
pub async fn confirm_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ConfirmOrderRequest>,
) -> AppResult<Json<OrderWithDetails>> {
    let order = order_service::confirm_order(&state, &id, payload).await?;
    Ok(Json(order))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(
        ("id" = String, Path, description = "Order ID"),
        ("passcode" = String, Query, description = "Passcode issued at checkout"),
    ),
    responses(
        (status = 200, description = "Order with details", body = OrderWithDetails),
        (status = 400, description = "Order has no passcode", body = ErrorBody),
        (status = 401, description = "Passcode mismatch", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody),
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppQuery(query): AppQuery<OrderPasscodeQuery>,
) -> AppResult<Json<OrderWithDetails>> {
    let order = order_service::get_order(&state, &id, &query.passcode).await?;
    Ok(Json(order))
}
