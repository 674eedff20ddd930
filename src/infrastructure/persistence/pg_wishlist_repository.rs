//! PostgreSQL implementation of the wishlist repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewWishlistItem, WishlistItem, WishlistPatch};
use crate::domain::repositories::WishlistRepository;
use crate::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct WishlistRow {
    id: i64,
    user_id: i64,
    product_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<WishlistRow> for WishlistItem {
    fn from(row: WishlistRow) -> Self {
        WishlistItem {
            id: row.id,
            user_id: row.user_id,
            product_id: row.product_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL repository for wishlist entries.
pub struct PgWishlistRepository {
    pool: Arc<PgPool>,
}

impl PgWishlistRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WishlistRepository for PgWishlistRepository {
    async fn find(&self, id: i64) -> Result<Option<WishlistItem>, AppError> {
        let row = sqlx::query_as::<_, WishlistRow>(
            r#"
            SELECT id, user_id, product_id, created_at, updated_at
            FROM wishlists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(WishlistItem::from))
    }

    async fn list(&self) -> Result<Vec<WishlistItem>, AppError> {
        let rows = sqlx::query_as::<_, WishlistRow>(
            r#"
            SELECT id, user_id, product_id, created_at, updated_at
            FROM wishlists
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(WishlistItem::from).collect())
    }

    async fn create(&self, new_item: NewWishlistItem) -> Result<WishlistItem, AppError> {
        let row = sqlx::query_as::<_, WishlistRow>(
            r#"
            INSERT INTO wishlists (user_id, product_id)
            VALUES ($1, $2)
            RETURNING id, user_id, product_id, created_at, updated_at
            "#,
        )
        .bind(new_item.user_id)
        .bind(new_item.product_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: i64,
        patch: WishlistPatch,
    ) -> Result<Option<WishlistItem>, AppError> {
        let row = sqlx::query_as::<_, WishlistRow>(
            r#"
            UPDATE wishlists SET
                product_id = COALESCE($2::BIGINT, product_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, product_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.product_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(WishlistItem::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM wishlists WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
