//! Handlers for wishlist endpoints.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::api::dto::message::MessageResponse;
use crate::api::dto::wishlist::{
    WishlistEntry, WishlistListResponse, WishlistMutationResponse, WishlistResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/wishlists`
pub async fn list_wishlists_handler(
    State(state): State<AppState>,
) -> Result<Json<WishlistListResponse>, AppError> {
    let items = state.wishlist_service.list_wishlists().await?;

    Ok(Json(WishlistListResponse {
        status: StatusCode::OK.as_u16(),
        wishlists: items.into_iter().map(WishlistEntry::from).collect(),
    }))
}

/// Adds a product to a user's wishlist.
///
/// # Endpoint
///
/// `POST /api/wishlists`
///
/// # Request Body
///
/// ```json
/// { "user_id": 1, "product_id": 42 }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if either id is missing or unknown.
pub async fn create_wishlist_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<WishlistMutationResponse>), AppError> {
    let Json(payload) = payload?;

    let item = state.wishlist_service.create_wishlist(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(WishlistMutationResponse {
            status: StatusCode::CREATED.as_u16(),
            message: "Wishlist created successfully",
            wishlist: item.into(),
        }),
    ))
}

/// `GET /api/wishlists/{id}`
pub async fn get_wishlist_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<WishlistResponse>, AppError> {
    let id = wishlist_id(id)?;
    let item = state.wishlist_service.get_wishlist(id).await?;

    Ok(Json(WishlistResponse {
        status: StatusCode::OK.as_u16(),
        wishlist: item.into(),
    }))
}

/// Points a wishlist entry at another product.
///
/// # Endpoint
///
/// `PUT /api/wishlists/{id}`, `PATCH /api/wishlists/{id}`
pub async fn update_wishlist_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<WishlistMutationResponse>, AppError> {
    let id = wishlist_id(id)?;
    let Json(payload) = payload?;

    let item = state.wishlist_service.update_wishlist(id, &payload).await?;

    Ok(Json(WishlistMutationResponse {
        status: StatusCode::OK.as_u16(),
        message: "Wishlist updated successfully",
        wishlist: item.into(),
    }))
}

/// `DELETE /api/wishlists/{id}`
pub async fn delete_wishlist_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = wishlist_id(id)?;
    state.wishlist_service.delete_wishlist(id).await?;

    Ok(Json(MessageResponse {
        status: StatusCode::OK.as_u16(),
        message: "Wishlist deleted successfully",
    }))
}

fn wishlist_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        AppError::not_found(
            "Wishlist not found",
            json!({ "reason": rejection.body_text() }),
        )
    })
}
