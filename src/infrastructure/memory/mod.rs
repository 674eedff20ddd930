//! In-process storage backend.
//!
//! [`MemoryStore`] implements every repository trait over `BTreeMap`s guarded
//! by a single [`tokio::sync::RwLock`]. It enforces the same referential rules
//! as the PostgreSQL schema: writes pointing at missing users, categories, or
//! products fail with [`crate::error::AppError::Conflict`], and deleting a
//! product removes its wishlist entries.
//!
//! Selected with `STORAGE_BACKEND=memory`. Data is lost on restart.

mod memory_store;

pub use memory_store::MemoryStore;
