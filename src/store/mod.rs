//! Storage seam for the product catalog.
//!
//! Handlers only talk to [`ProductStore`]. [`PgProductStore`] is the real
//! backend; [`MemoryProductStore`] keeps rows in process and is used for local
//! development without Postgres and by the test suite.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{Product, ProductCreate},
};

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Short backend name reported by the readiness probe.
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> Result<()>;

    async fn list(&self) -> Result<Vec<Product>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>>;

    /// Inserts a row with a storage-assigned id.
    async fn create(&self, req: &ProductCreate) -> Result<Product>;

    /// Replaces every field of row `id`. `None` if the row does not exist.
    async fn update(&self, id: i32, req: &ProductCreate) -> Result<Option<Product>>;

    /// `true` if a row was removed.
    async fn delete(&self, id: i32) -> Result<bool>;
}
