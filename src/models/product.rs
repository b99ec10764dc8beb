use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// A catalog row as stored in `products` and returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub category: String,
    pub is_available: bool,
}

/// Client-authored product fields. `name` and `price` are required; explicit
/// `null` on an optional text field falls back to its default. Any `id` in the
/// body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductBase {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

pub type ProductCreate = ProductBase;

fn default_available() -> bool {
    true
}

impl ProductBase {
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn image_url(&self) -> &str {
        self.image_url.as_deref().unwrap_or("")
    }

    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Full-replace view of this payload as a row with the given id.
    pub fn to_product(&self, id: i32) -> Product {
        Product {
            id,
            name: self.name.clone(),
            description: self.description().to_string(),
            price: self.price,
            image_url: self.image_url().to_string(),
            category: self.category().to_string(),
            is_available: self.is_available,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
