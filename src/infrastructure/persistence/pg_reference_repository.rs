//! PostgreSQL access to reference data (users, categories).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Category, Reference, User};
use crate::domain::repositories::{ReferenceLookup, StorageProbe};
use crate::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct NamedRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

/// Foreign-key existence checks plus the user/category management used by
/// the `admin` binary.
pub struct PgReferenceRepository {
    pool: Arc<PgPool>,
}

impl PgReferenceRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub async fn create_user(&self, name: &str) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, NamedRow>(
            "INSERT INTO users (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(User {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        })
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let rows =
            sqlx::query_as::<_, NamedRow>("SELECT id, name, created_at FROM users ORDER BY id")
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(rows
            .into_iter()
            .map(|r| User {
                id: r.id,
                name: r.name,
                created_at: r.created_at,
            })
            .collect())
    }

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a category with the same name exists.
    pub async fn create_category(&self, name: &str) -> Result<Category, AppError> {
        let row = sqlx::query_as::<_, NamedRow>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Category {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        })
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, NamedRow>(
            "SELECT id, name, created_at FROM categories ORDER BY name",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Category {
                id: r.id,
                name: r.name,
                created_at: r.created_at,
            })
            .collect())
    }
}

#[async_trait]
impl ReferenceLookup for PgReferenceRepository {
    async fn exists(&self, reference: Reference, id: i64) -> Result<bool, AppError> {
        let sql = match reference {
            Reference::Users => "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)",
            Reference::Categories => "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)",
            Reference::Products => "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)",
        };

        let exists = sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(exists)
    }
}

#[async_trait]
impl StorageProbe for PgReferenceRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
