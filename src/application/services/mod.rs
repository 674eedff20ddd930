//! Business logic services for the application layer.

pub mod product_service;
pub mod wishlist_service;

pub use product_service::ProductService;
pub use wishlist_service::WishlistService;
