use serde::Serialize;

use super::Product;

/// Hardcoded catalog served by the prototype endpoints. Never persisted.
pub fn mock_products() -> Vec<Product> {
    vec![
        mock_product(
            1,
            "Chicken Burger",
            "Juicy grilled chicken burger with fresh veggies",
            12.99,
            "Burgers",
        ),
        mock_product(
            2,
            "Vegetable Pizza",
            "Fresh vegetable pizza with mozzarella cheese",
            15.99,
            "Pizza",
        ),
        mock_product(
            3,
            "French Fries",
            "Crispy golden fries with seasoning",
            5.99,
            "Sides",
        ),
    ]
}

fn mock_product(id: i32, name: &str, description: &str, price: f64, category: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price,
        image_url: String::new(),
        category: category.to_string(),
        is_available: true,
    }
}

/// Error-shaped body the prototype returns with a 200 status.
#[derive(Debug, Serialize)]
pub struct MockError {
    pub error: String,
}
