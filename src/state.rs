//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{ProductService, WishlistService};
use crate::domain::repositories::StorageProbe;

/// Services and storage handles shared across requests.
///
/// Cloning is cheap: every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<ProductService>,
    pub wishlist_service: Arc<WishlistService>,
    pub storage: Arc<dyn StorageProbe>,
}

impl AppState {
    pub fn new(
        product_service: Arc<ProductService>,
        wishlist_service: Arc<WishlistService>,
        storage: Arc<dyn StorageProbe>,
    ) -> Self {
        Self {
            product_service,
            wishlist_service,
            storage,
        }
    }
}
