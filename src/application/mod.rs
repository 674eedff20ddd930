//! Application layer: services and input validation.
//!
//! Services orchestrate validation and repository calls and expose a typed
//! API to HTTP handlers.
//!
//! - [`services::product_service::ProductService`] - Product CRUD, listing, and search
//! - [`services::wishlist_service::WishlistService`] - Wishlist CRUD
//! - [`validation`] - Typed field-rule tables for request bodies

pub mod services;
pub mod validation;
