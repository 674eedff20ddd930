//! Wishlist management service.

use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::application::validation::{FieldKind, FieldRule, RuleSet, validate_payload};
use crate::domain::entities::{NewWishlistItem, Reference, WishlistItem, WishlistPatch};
use crate::domain::repositories::{ReferenceLookup, WishlistRepository};
use crate::error::AppError;

const PRODUCT: FieldRule = FieldRule::required(FieldKind::Integer).exists(Reference::Products);

/// Field rules for `POST /api/wishlists`.
pub const CREATE_WISHLIST_RULES: RuleSet = &[
    ("product_id", PRODUCT),
    (
        "user_id",
        FieldRule::required(FieldKind::Integer).exists(Reference::Users),
    ),
];

/// Field rules for `PUT/PATCH /api/wishlists/{id}`.
pub const UPDATE_WISHLIST_RULES: RuleSet = &[("product_id", PRODUCT)];

#[derive(Debug, Deserialize)]
struct WishlistInput {
    user_id: Option<i64>,
    product_id: Option<i64>,
}

/// Service for wishlist entries.
pub struct WishlistService {
    wishlists: Arc<dyn WishlistRepository>,
    references: Arc<dyn ReferenceLookup>,
}

impl WishlistService {
    pub fn new(
        wishlists: Arc<dyn WishlistRepository>,
        references: Arc<dyn ReferenceLookup>,
    ) -> Self {
        Self {
            wishlists,
            references,
        }
    }

    pub async fn list_wishlists(&self) -> Result<Vec<WishlistItem>, AppError> {
        self.wishlists.list().await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the entry does not exist.
    pub async fn get_wishlist(&self, id: i64) -> Result<WishlistItem, AppError> {
        self.wishlists
            .find(id)
            .await?
            .ok_or_else(|| wishlist_not_found(id))
    }

    /// Validates `payload` against [`CREATE_WISHLIST_RULES`] and saves the entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the user or product is missing or unknown.
    pub async fn create_wishlist(&self, payload: &Value) -> Result<WishlistItem, AppError> {
        validate_payload(payload, CREATE_WISHLIST_RULES, self.references.as_ref()).await?;

        let input = parse(payload)?;
        let (Some(user_id), Some(product_id)) = (input.user_id, input.product_id) else {
            return Err(AppError::bad_request(
                "Validation failed",
                json!({ "body": ["user_id and product_id are required"] }),
            ));
        };

        let item = self
            .wishlists
            .create(NewWishlistItem {
                user_id,
                product_id,
            })
            .await?;

        tracing::info!(wishlist_id = item.id, user_id, product_id, "Wishlist entry created");
        Ok(item)
    }

    /// Validates `payload` against [`UPDATE_WISHLIST_RULES`] and applies it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on invalid input.
    /// Returns [`AppError::NotFound`] if the entry does not exist.
    pub async fn update_wishlist(
        &self,
        id: i64,
        payload: &Value,
    ) -> Result<WishlistItem, AppError> {
        validate_payload(payload, UPDATE_WISHLIST_RULES, self.references.as_ref()).await?;

        let input = parse(payload)?;
        let patch = WishlistPatch {
            product_id: input.product_id,
        };

        let item = self
            .wishlists
            .update(id, patch)
            .await?
            .ok_or_else(|| wishlist_not_found(id))?;

        tracing::info!(wishlist_id = id, product_id = item.product_id, "Wishlist entry updated");
        Ok(item)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the entry does not exist.
    pub async fn delete_wishlist(&self, id: i64) -> Result<(), AppError> {
        if !self.wishlists.delete(id).await? {
            return Err(wishlist_not_found(id));
        }

        tracing::info!(wishlist_id = id, "Wishlist entry deleted");
        Ok(())
    }
}

fn parse(payload: &Value) -> Result<WishlistInput, AppError> {
    WishlistInput::deserialize(payload)
        .map_err(|e| AppError::bad_request("Validation failed", json!({ "body": [e.to_string()] })))
}

fn wishlist_not_found(id: i64) -> AppError {
    AppError::not_found("Wishlist not found", json!({ "id": id }))
}
