use async_trait::async_trait;
use sqlx::PgPool;

use super::ProductStore;
use crate::{
    database,
    error::Result,
    models::{Product, ProductCreate},
    queries::product_queries,
};

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<()> {
        database::check_health(&self.pool).await
    }

    async fn list(&self) -> Result<Vec<Product>> {
        product_queries::find_all(&self.pool).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        product_queries::find_by_id(&self.pool, id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>> {
        product_queries::find_by_name(&self.pool, name).await
    }

    async fn create(&self, req: &ProductCreate) -> Result<Product> {
        product_queries::create_product(&self.pool, req).await
    }

    async fn update(&self, id: i32, req: &ProductCreate) -> Result<Option<Product>> {
        product_queries::update_product(&self.pool, id, req).await
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let affected = product_queries::delete_product(&self.pool, id).await?;
        Ok(affected > 0)
    }
}
