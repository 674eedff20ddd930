//! DTOs for wishlist endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::WishlistItem;

#[derive(Debug, Serialize)]
pub struct WishlistEntry {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WishlistItem> for WishlistEntry {
    fn from(item: WishlistItem) -> Self {
        Self {
            id: item.id,
            user_id: item.user_id,
            product_id: item.product_id,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// `GET /api/wishlists`.
#[derive(Debug, Serialize)]
pub struct WishlistListResponse {
    pub status: u16,
    pub wishlists: Vec<WishlistEntry>,
}

/// `GET /api/wishlists/{id}`.
#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub status: u16,
    pub wishlist: WishlistEntry,
}

/// Create and update responses.
#[derive(Debug, Serialize)]
pub struct WishlistMutationResponse {
    pub status: u16,
    pub message: &'static str,
    pub wishlist: WishlistEntry,
}
