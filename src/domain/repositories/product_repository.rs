//! Repository trait for product persistence.

use crate::domain::entities::{NewProduct, Product, ProductFilter, ProductPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for products.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProductRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Finds a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find(&self, id: i64) -> Result<Option<Product>, AppError>;

    /// Lists products matching `filter`, newest first (ties: higher ID first).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(&self, filter: ProductFilter) -> Result<Vec<Product>, AppError>;

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a referenced user or category vanished.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_product: NewProduct) -> Result<Product, AppError>;

    /// Applies a partial update. Returns `None` if the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, id: i64, patch: ProductPatch) -> Result<Option<Product>, AppError>;

    /// Deletes a product and its wishlist entries. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
