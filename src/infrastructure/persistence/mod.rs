//! PostgreSQL repository implementations.
//!
//! Queries are built with SQLx's runtime API (`query_as` + `FromRow`), so the
//! crate builds without a live database.
//!
//! - [`PgProductRepository`] - Product storage, filtering, and updates
//! - [`PgWishlistRepository`] - Wishlist storage
//! - [`PgReferenceRepository`] - Users, categories, and foreign-key lookups

pub mod pg_product_repository;
pub mod pg_reference_repository;
pub mod pg_wishlist_repository;

pub use pg_product_repository::PgProductRepository;
pub use pg_reference_repository::PgReferenceRepository;
pub use pg_wishlist_repository::PgWishlistRepository;
