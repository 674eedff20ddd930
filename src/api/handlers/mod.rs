//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod products;
pub mod wishlists;

pub use health::health_handler;
pub use products::{
    create_product_handler, delete_product_handler, get_product_handler, list_products_handler,
    search_products_handler, update_product_handler,
};
pub use wishlists::{
    create_wishlist_handler, delete_wishlist_handler, get_wishlist_handler,
    list_wishlists_handler, update_wishlist_handler,
};
