//! Core domain entities.
//!
//! Entities are plain data structures. Creation and partial updates use
//! dedicated input types:
//!
//! - [`Product`] with [`NewProduct`] / [`ProductPatch`], listed through [`ProductFilter`]
//! - [`WishlistItem`] with [`NewWishlistItem`] / [`WishlistPatch`]
//! - [`User`] and [`Category`] - reference data targeted by foreign keys

pub mod product;
pub mod reference;
pub mod wishlist;

pub use product::{NewProduct, Product, ProductFilter, ProductPatch, ProductStatus};
pub use reference::{Category, Reference, User};
pub use wishlist::{NewWishlistItem, WishlistItem, WishlistPatch};
