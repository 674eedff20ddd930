//! Data Transfer Objects for API requests and responses.
//!
//! Every response envelope carries the numeric HTTP status in `status`.

pub mod health;
pub mod message;
pub mod product;
pub mod wishlist;
