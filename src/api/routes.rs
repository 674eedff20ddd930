//! API route configuration.

use crate::api::handlers::{
    create_product_handler, create_wishlist_handler, delete_product_handler,
    delete_wishlist_handler, get_product_handler, get_wishlist_handler, list_products_handler,
    list_wishlists_handler, search_products_handler, update_product_handler,
    update_wishlist_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Product and wishlist routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET    /products`            - List products (filters: `status`, `user_id`, `category_id`, `q`)
/// - `POST   /products`            - Create a product
/// - `GET    /products/search`     - Accent-insensitive search over published products
/// - `GET    /products/{id}`       - Show a product
/// - `PUT    /products/{id}`       - Update a product
/// - `PATCH  /products/{id}`       - Update a product
/// - `DELETE /products/{id}`       - Delete a product
/// - `GET    /wishlists`           - List wishlist entries
/// - `POST   /wishlists`           - Create a wishlist entry
/// - `GET    /wishlists/{id}`      - Show a wishlist entry
/// - `PUT    /wishlists/{id}`      - Update a wishlist entry
/// - `PATCH  /wishlists/{id}`      - Update a wishlist entry
/// - `DELETE /wishlists/{id}`      - Delete a wishlist entry
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(list_products_handler).post(create_product_handler),
        )
        .route("/products/search", get(search_products_handler))
        .route(
            "/products/{id}",
            get(get_product_handler)
                .put(update_product_handler)
                .patch(update_product_handler)
                .delete(delete_product_handler),
        )
        .route(
            "/wishlists",
            get(list_wishlists_handler).post(create_wishlist_handler),
        )
        .route(
            "/wishlists/{id}",
            get(get_wishlist_handler)
                .put(update_wishlist_handler)
                .patch(update_wishlist_handler)
                .delete(delete_wishlist_handler),
        )
}
