//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access. Implementations live in
//! [`crate::infrastructure`]; mocks are generated via `mockall` for unit tests.
//!
//! - [`ProductRepository`] - Product CRUD and filtered listing
//! - [`WishlistRepository`] - Wishlist CRUD
//! - [`ReferenceLookup`] - Foreign-key existence checks used by validation
//! - [`StorageProbe`] - Liveness check for the health endpoint

pub mod product_repository;
pub mod reference_lookup;
pub mod wishlist_repository;

pub use product_repository::ProductRepository;
pub use reference_lookup::{ReferenceLookup, StorageProbe};
pub use wishlist_repository::WishlistRepository;

#[cfg(test)]
pub use product_repository::MockProductRepository;
#[cfg(test)]
pub use reference_lookup::MockReferenceLookup;
#[cfg(test)]
pub use wishlist_repository::MockWishlistRepository;
