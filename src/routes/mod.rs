mod health;
mod mock;
mod products;

use axum::{Router, routing::get};

use crate::AppState;

pub fn create_router(mock_api_enabled: bool) -> Router<AppState> {
    let router = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .merge(product_router());

    if mock_api_enabled {
        router.merge(mock_router())
    } else {
        router
    }
}

/// Answers on both `/api/products` and `/api/products/`.
fn product_router() -> Router<AppState> {
    let collection = get(products::list_products).post(products::create_product);

    Router::new()
        .route("/api/products", collection.clone())
        .route("/api/products/", collection)
        .route(
            "/api/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
}

fn mock_router() -> Router<AppState> {
    Router::new()
        .route("/", get(mock::root))
        .route("/products", get(mock::list_products))
        .route("/products/{id}", get(mock::get_product))
}
