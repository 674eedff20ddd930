//! DTOs for product endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::domain::entities::{Product, ProductFilter, ProductStatus};

/// Product as returned by the API, including the derived `href`.
#[derive(Debug, Serialize)]
pub struct ProductItem {
    pub id: i64,
    pub user_id: i64,
    pub category_id: Option<i64>,
    pub title: String,
    pub slug: String,
    pub href: String,
    pub description: Option<String>,
    pub condition: Option<String>,
    pub stock: Option<i64>,
    pub upc: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub publication_type: Option<String>,
    pub warranty_type: Option<String>,
    pub warranty_duration: Option<i64>,
    pub warranty_duration_type: Option<String>,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductItem {
    fn from(product: Product) -> Self {
        let href = product.href();
        Self {
            id: product.id,
            user_id: product.user_id,
            category_id: product.category_id,
            title: product.title,
            slug: product.slug,
            href,
            description: product.description,
            condition: product.condition,
            stock: product.stock,
            upc: product.upc,
            sku: product.sku,
            price: product.price,
            publication_type: product.publication_type,
            warranty_type: product.warranty_type,
            warranty_duration: product.warranty_duration,
            warranty_duration_type: product.warranty_duration_type,
            status: product.status,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// `GET /api/products` and `GET /api/products/search`.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub status: u16,
    pub products: Vec<ProductItem>,
}

/// `GET /api/products/{id}`.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub status: u16,
    pub product: ProductItem,
}

/// Create and update responses.
#[derive(Debug, Serialize)]
pub struct ProductMutationResponse {
    pub status: u16,
    pub message: &'static str,
    pub product: ProductItem,
}

/// Query parameters of `GET /api/products`.
///
/// Ids are parsed from the query string with `serde_with`. When `q` is
/// present the listing becomes a search and the attribute filters are ignored.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProductListParams {
    #[serde(default)]
    pub q: Option<String>,

    #[serde(default)]
    pub status: Option<ProductStatus>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, message = "The user id must be at least 1."))]
    pub user_id: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, message = "The category id must be at least 1."))]
    pub category_id: Option<i64>,
}

impl ProductListParams {
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            status: self.status,
            user_id: self.user_id,
            category_id: self.category_id,
        }
    }
}

/// Query parameters of `GET /api/products/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}
