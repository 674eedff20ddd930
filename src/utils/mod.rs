//! Text helpers shared across layers.
//!
//! - [`text_normalizer`] - Case and accent folding for search comparison
//! - [`slug`] - URL slug derivation from product titles

pub mod slug;
pub mod text_normalizer;
