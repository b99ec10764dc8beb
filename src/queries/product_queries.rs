use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Product, ProductCreate},
};

pub async fn find_all(pool: &PgPool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY id ASC")
        .fetch_all(pool)
        .await?;

    Ok(products)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn create_product(pool: &PgPool, req: &ProductCreate) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (
            name, description, price, image_url, category, is_available
        )
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&req.name)
    .bind(req.description())
    .bind(req.price)
    .bind(req.image_url())
    .bind(req.category())
    .bind(req.is_available)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

/// Overwrites every column. Returns `None` when no row has `id`.
pub async fn update_product(
    pool: &PgPool,
    id: i32,
    req: &ProductCreate,
) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET
            name = $1,
            description = $2,
            price = $3,
            image_url = $4,
            category = $5,
            is_available = $6
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(&req.name)
    .bind(req.description())
    .bind(req.price)
    .bind(req.image_url())
    .bind(req.category())
    .bind(req.is_available)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

pub async fn delete_product(pool: &PgPool, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
