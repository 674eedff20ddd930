//! Repository trait for wishlist persistence.

use crate::domain::entities::{NewWishlistItem, WishlistItem, WishlistPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for wishlist entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistRepository: Send + Sync {
    async fn find(&self, id: i64) -> Result<Option<WishlistItem>, AppError>;

    /// Lists every wishlist entry in ID order.
    async fn list(&self) -> Result<Vec<WishlistItem>, AppError>;

    async fn create(&self, new_item: NewWishlistItem) -> Result<WishlistItem, AppError>;

    /// Returns `None` if the entry does not exist.
    async fn update(&self, id: i64, patch: WishlistPatch)
    -> Result<Option<WishlistItem>, AppError>;

    /// Returns `false` if the entry did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
