use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ProductStore;
use crate::{
    error::{AppError, DUPLICATE_NAME_MESSAGE, Result},
    models::{Product, ProductCreate},
};

#[derive(Debug, Default)]
struct Inner {
    last_id: i32,
    products: BTreeMap<i32, Product>,
}

/// In-process store with the same observable rules as the `products` table:
/// serial ids that are never reused, and a unique `name`.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    inner: RwLock<Inner>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_taken(inner: &Inner, name: &str, except: Option<i32>) -> bool {
    inner
        .products
        .values()
        .any(|p| p.name == name && Some(p.id) != except)
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.products.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.products.values().find(|p| p.name == name).cloned())
    }

    async fn create(&self, req: &ProductCreate) -> Result<Product> {
        let mut inner = self.inner.write().await;

        if name_taken(&inner, &req.name, None) {
            return Err(AppError::BadRequest(DUPLICATE_NAME_MESSAGE.to_string()));
        }

        let id = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| AppError::InternalError("Product id space exhausted".to_string()))?;
        inner.last_id = id;

        let product = req.to_product(id);
        inner.products.insert(id, product.clone());

        Ok(product)
    }

    async fn update(&self, id: i32, req: &ProductCreate) -> Result<Option<Product>> {
        let mut inner = self.inner.write().await;

        if !inner.products.contains_key(&id) {
            return Ok(None);
        }

        if name_taken(&inner, &req.name, Some(id)) {
            return Err(AppError::BadRequest(DUPLICATE_NAME_MESSAGE.to_string()));
        }

        let product = req.to_product(id);
        inner.products.insert(id, product.clone());

        Ok(Some(product))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.products.remove(&id).is_some())
    }
}
