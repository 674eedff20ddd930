//! Foreign-key existence checks and storage liveness.

use crate::domain::entities::Reference;
use crate::error::AppError;
use async_trait::async_trait;

/// Answers "does row `id` exist in `reference`?" for input validation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceLookup: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists(&self, reference: Reference, id: i64) -> Result<bool, AppError>;
}

/// Cheap round-trip used by the health endpoint.
#[async_trait]
pub trait StorageProbe: Send + Sync {
    /// Human-readable backend name reported by the health check.
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> Result<(), AppError>;
}
