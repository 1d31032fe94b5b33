use uuid::Uuid;

use crate::{
    db,
    dto::products::{CreateProductRequest, UpdateProductRequest},
    entity::products::Model as ProductModel,
    error::{AppError, AppResult},
    models::Product,
    state::AppState,
};

pub async fn list_products(state: &AppState) -> AppResult<Vec<Product>> {
    let items = db::products::list_active(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();
    Ok(items)
}

pub async fn get_product(state: &AppState, id: &str) -> AppResult<Product> {
    let product = db::products::find_active(&state.orm, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(product_from_entity(product))
}

pub async fn create_product(state: &AppState, payload: CreateProductRequest) -> AppResult<Product> {
    payload.validate()?;
    let id = Uuid::new_v4().to_string();
    let product = db::products::insert(&state.orm, id, payload.name, payload.price).await?;
    tracing::info!(product_id = %product.id, price = product.price, "product created");
    Ok(product_from_entity(product))
}

pub async fn update_product(
    state: &AppState,
    id: &str,
    payload: UpdateProductRequest,
) -> AppResult<Product> {
    payload.validate()?;
    let existing = db::products::find_active(&state.orm, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let product =
        db::products::update(&state.orm, existing, payload.name(), payload.price()).await?;
    tracing::info!(product_id = %product.id, "product updated");
    Ok(product_from_entity(product))
}

pub async fn delete_product(state: &AppState, id: &str) -> AppResult<()> {
    if !db::products::soft_delete(&state.orm, id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(product_id = %id, "product soft-deleted");
    Ok(())
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: model.price,
    }
}
