//! Domain entity representing a wishlist entry.

use chrono::{DateTime, Utc};

/// A product saved by a user for later.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistItem {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a wishlist entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWishlistItem {
    pub user_id: i64,
    pub product_id: i64,
}

/// Partial update of a wishlist entry. Only the saved product can change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishlistPatch {
    pub product_id: Option<i64>,
}

impl WishlistPatch {
    pub fn apply_to(&self, item: &mut WishlistItem) {
        if let Some(product_id) = self.product_id {
            item.product_id = product_id;
        }
    }
}
