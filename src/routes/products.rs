use axum::{Json, extract::State};

use crate::{
    AppState,
    error::{AppError, DUPLICATE_NAME_MESSAGE, Result},
    models::{MessageResponse, Product, ProductCreate},
    utils::extractors::{ValidJson, ValidPath},
};

const NOT_FOUND_MESSAGE: &str = "Product not found";

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.store.list().await?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<Product>> {
    let product = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<ProductCreate>,
) -> Result<Json<Product>> {
    if state.store.find_by_name(&payload.name).await?.is_some() {
        return Err(AppError::BadRequest(DUPLICATE_NAME_MESSAGE.to_string()));
    }

    let product = state.store.create(&payload).await?;
    tracing::info!("Created product {} ({})", product.id, product.name);

    Ok(Json(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
    ValidJson(payload): ValidJson<ProductCreate>,
) -> Result<Json<Product>> {
    let product = state
        .store
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;
    tracing::info!("Updated product {}", id);

    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<MessageResponse>> {
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }
    tracing::info!("Deleted product {}", id);

    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
