//! Handlers for product endpoints.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde_json::{Value, json};
use validator::Validate;

use crate::api::dto::message::MessageResponse;
use crate::api::dto::product::{
    ProductItem, ProductListParams, ProductListResponse, ProductMutationResponse,
    ProductResponse, SearchParams,
};
use crate::error::AppError;
use crate::state::AppState;

/// Lists products, optionally filtered by attribute or searched by text.
///
/// # Endpoint
///
/// `GET /api/products`
///
/// # Query Parameters
///
/// - `status` - `draft`, `published`, `paused` or `closed`
/// - `user_id`, `category_id` - exact match
/// - `q` - switches to search (see [`search_products_handler`])
///
/// Results are ordered newest first.
///
/// # Errors
///
/// Returns 400 Bad Request for unknown statuses or non-numeric ids.
pub async fn list_products_handler(
    State(state): State<AppState>,
    params: Result<Query<ProductListParams>, QueryRejection>,
) -> Result<Json<ProductListResponse>, AppError> {
    let Query(params) = params?;
    params.validate()?;

    let products = match params.q.as_deref() {
        Some(q) => state.product_service.search_products(Some(q)).await?,
        None => state.product_service.list_products(params.filter()).await?,
    };

    Ok(Json(ProductListResponse {
        status: StatusCode::OK.as_u16(),
        products: products.into_iter().map(ProductItem::from).collect(),
    }))
}

/// Searches published products, ignoring case and accents.
///
/// # Endpoint
///
/// `GET /api/products/search?q=cafe`
///
/// An absent or blank `q` returns every published product.
pub async fn search_products_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ProductListResponse>, AppError> {
    let Query(params) = params?;

    let products = state
        .product_service
        .search_products(params.q.as_deref())
        .await?;

    Ok(Json(ProductListResponse {
        status: StatusCode::OK.as_u16(),
        products: products.into_iter().map(ProductItem::from).collect(),
    }))
}

/// Creates a product.
///
/// # Endpoint
///
/// `POST /api/products`
///
/// # Request Body
///
/// ```json
/// {
///   "user_id": 1,
///   "title": "Café de Colombia",
///   "status": "published",
///   "price": 12.5
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request with field-level messages if validation fails.
pub async fn create_product_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductMutationResponse>), AppError> {
    let Json(payload) = payload?;

    let product = state.product_service.create_product(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductMutationResponse {
            status: StatusCode::CREATED.as_u16(),
            message: "Product created successfully",
            product: product.into(),
        }),
    ))
}

/// `GET /api/products/{id}`
pub async fn get_product_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    let id = product_id(id)?;
    let product = state.product_service.get_product(id).await?;

    Ok(Json(ProductResponse {
        status: StatusCode::OK.as_u16(),
        product: product.into(),
    }))
}

/// Updates a product. `PUT` and `PATCH` both apply a partial update.
///
/// # Endpoint
///
/// `PUT /api/products/{id}`, `PATCH /api/products/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the product doesn't exist.
/// Returns 400 Bad Request if validation fails.
pub async fn update_product_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ProductMutationResponse>, AppError> {
    let id = product_id(id)?;
    let Json(payload) = payload?;

    let product = state.product_service.update_product(id, &payload).await?;

    Ok(Json(ProductMutationResponse {
        status: StatusCode::OK.as_u16(),
        message: "Product updated successfully",
        product: product.into(),
    }))
}

/// Deletes a product along with the wishlist entries pointing at it.
///
/// # Endpoint
///
/// `DELETE /api/products/{id}`
pub async fn delete_product_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = product_id(id)?;
    state.product_service.delete_product(id).await?;

    Ok(Json(MessageResponse {
        status: StatusCode::OK.as_u16(),
        message: "Product deleted successfully",
    }))
}

/// A path segment that is not an integer cannot name a product.
fn product_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        AppError::not_found(
            "Product not found",
            json!({ "reason": rejection.body_text() }),
        )
    })
}
