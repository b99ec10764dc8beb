//! Prototype endpoints over a fixed in-memory list. Kept as a demo mode; they
//! never touch the persistent catalog.

use axum::{
    Json,
    response::{IntoResponse, Response},
};

use crate::{
    models::{MessageResponse, MockError, Product, mock_products},
    utils::extractors::ValidPath,
};

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Mpepo Kitchen API is running!"))
}

pub async fn list_products() -> Json<Vec<Product>> {
    Json(mock_products())
}

/// Unknown ids answer 200 with `{"error": ...}`; existing clients rely on it.
pub async fn get_product(ValidPath(id): ValidPath<i32>) -> Response {
    match mock_products().into_iter().find(|p| p.id == id) {
        Some(product) => Json(product).into_response(),
        None => Json(MockError {
            error: "Product not found".to_string(),
        })
        .into_response(),
    }
}
