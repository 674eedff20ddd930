//! PostgreSQL implementation of the product repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewProduct, Product, ProductFilter, ProductPatch, ProductStatus};
use crate::domain::repositories::ProductRepository;
use crate::error::AppError;

const PRODUCT_COLUMNS: &str = "id, user_id, category_id, title, slug, description, condition, \
     stock, upc, sku, price, publication_type, warranty_type, warranty_duration, \
     warranty_duration_type, status, created_at, updated_at";

/// Raw `products` row. `status` is validated when converting to [`Product`].
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    user_id: i64,
    category_id: Option<i64>,
    title: String,
    slug: String,
    description: Option<String>,
    condition: Option<String>,
    stock: Option<i64>,
    upc: Option<String>,
    sku: Option<String>,
    price: Option<f64>,
    publication_type: Option<String>,
    warranty_type: Option<String>,
    warranty_duration: Option<i64>,
    warranty_duration_type: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = AppError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<ProductStatus>().map_err(|e| {
            AppError::internal(
                "Corrupt product row",
                json!({ "id": row.id, "reason": format!("{e}") }),
            )
        })?;

        Ok(Product {
            id: row.id,
            user_id: row.user_id,
            category_id: row.category_id,
            title: row.title,
            slug: row.slug,
            description: row.description,
            condition: row.condition,
            stock: row.stock,
            upc: row.upc,
            sku: row.sku,
            price: row.price,
            publication_type: row.publication_type,
            warranty_type: row.warranty_type,
            warranty_duration: row.warranty_duration,
            warranty_duration_type: row.warranty_duration_type,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL repository for products.
pub struct PgProductRepository {
    pool: Arc<PgPool>,
}

impl PgProductRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find(&self, id: i64) -> Result<Option<Product>, AppError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Product::try_from).transpose()
    }

    async fn list(&self, filter: ProductFilter) -> Result<Vec<Product>, AppError> {
        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE ($1::TEXT IS NULL OR status = $1)
              AND ($2::BIGINT IS NULL OR user_id = $2)
              AND ($3::BIGINT IS NULL OR category_id = $3)
            ORDER BY created_at DESC, id DESC
            "#
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.user_id)
            .bind(filter.category_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn create(&self, new_product: NewProduct) -> Result<Product, AppError> {
        let sql = format!(
            r#"
            INSERT INTO products (
                user_id, category_id, title, slug, description, condition, stock, upc, sku,
                price, publication_type, warranty_type, warranty_duration,
                warranty_duration_type, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(new_product.user_id)
            .bind(new_product.category_id)
            .bind(new_product.title)
            .bind(new_product.slug)
            .bind(new_product.description)
            .bind(new_product.condition)
            .bind(new_product.stock)
            .bind(new_product.upc)
            .bind(new_product.sku)
            .bind(new_product.price)
            .bind(new_product.publication_type)
            .bind(new_product.warranty_type)
            .bind(new_product.warranty_duration)
            .bind(new_product.warranty_duration_type)
            .bind(new_product.status.as_str())
            .fetch_one(self.pool.as_ref())
            .await?;

        Product::try_from(row)
    }

    async fn update(&self, id: i64, patch: ProductPatch) -> Result<Option<Product>, AppError> {
        let sql = format!(
            r#"
            UPDATE products SET
                category_id            = COALESCE($2::BIGINT, category_id),
                title                  = COALESCE($3::TEXT, title),
                slug                   = COALESCE($4::TEXT, slug),
                description            = COALESCE($5::TEXT, description),
                condition              = COALESCE($6::TEXT, condition),
                stock                  = COALESCE($7::BIGINT, stock),
                upc                    = COALESCE($8::TEXT, upc),
                sku                    = COALESCE($9::TEXT, sku),
                price                  = COALESCE($10::DOUBLE PRECISION, price),
                publication_type       = COALESCE($11::TEXT, publication_type),
                warranty_type          = COALESCE($12::TEXT, warranty_type),
                warranty_duration      = COALESCE($13::BIGINT, warranty_duration),
                warranty_duration_type = COALESCE($14::TEXT, warranty_duration_type),
                status                 = COALESCE($15::TEXT, status),
                updated_at             = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .bind(patch.category_id)
            .bind(patch.title)
            .bind(patch.slug)
            .bind(patch.description)
            .bind(patch.condition)
            .bind(patch.stock)
            .bind(patch.upc)
            .bind(patch.sku)
            .bind(patch.price)
            .bind(patch.publication_type)
            .bind(patch.warranty_type)
            .bind(patch.warranty_duration)
            .bind(patch.warranty_duration_type)
            .bind(patch.status.map(|s| s.as_str()))
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Product::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        // Wishlist entries go with the product (ON DELETE CASCADE).
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
