//! Domain entity representing a catalog product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publication state of a product. Only [`ProductStatus::Published`] products
/// are visible to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Published,
    Paused,
    Closed,
}

impl ProductStatus {
    /// Wire names of every status, in declaration order.
    pub const NAMES: &'static [&'static str] = &["draft", "published", "paused", "closed"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "draft",
            ProductStatus::Published => "published",
            ProductStatus::Paused => "paused",
            ProductStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown product status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ProductStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ProductStatus::Draft),
            "published" => Ok(ProductStatus::Published),
            "paused" => Ok(ProductStatus::Paused),
            "closed" => Ok(ProductStatus::Closed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A product listed by a seller.
///
/// The public `href` is never stored; see [`Product::href`].
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub user_id: i64,
    pub category_id: Option<i64>,
    pub title: String,
    pub slug: String,
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

impl Product {
    /// Public path of the product page: `/{slug}/p/MLP{id}`.
    pub fn href(&self) -> String {
        format!("/{}/p/MLP{}", self.slug, self.id)
    }
}

/// Input data for creating a product. The slug is derived by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub user_id: i64,
    pub category_id: Option<i64>,
    pub title: String,
    pub slug: String,
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
}

/// Partial update. `None` leaves the stored value unchanged.
///
/// The owner (`user_id`) cannot be changed after creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub category_id: Option<i64>,
    pub title: Option<String>,
    pub slug: Option<String>,
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
    pub status: Option<ProductStatus>,
}

impl ProductPatch {
    /// Applies the patch to `product` in place. Does not touch `updated_at`.
    pub fn apply_to(&self, product: &mut Product) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }
        fn set_opt<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if let Some(v) = value {
                *target = Some(v.clone());
            }
        }

        set_opt(&mut product.category_id, &self.category_id);
        set(&mut product.title, &self.title);
        set(&mut product.slug, &self.slug);
        set_opt(&mut product.description, &self.description);
        set_opt(&mut product.condition, &self.condition);
        set_opt(&mut product.stock, &self.stock);
        set_opt(&mut product.upc, &self.upc);
        set_opt(&mut product.sku, &self.sku);
        set_opt(&mut product.price, &self.price);
        set_opt(&mut product.publication_type, &self.publication_type);
        set_opt(&mut product.warranty_type, &self.warranty_type);
        set_opt(&mut product.warranty_duration, &self.warranty_duration);
        set_opt(
            &mut product.warranty_duration_type,
            &self.warranty_duration_type,
        );
        set(&mut product.status, &self.status);
    }
}

/// Attribute-equality filter for product listings. `None` matches anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub status: Option<ProductStatus>,
    pub user_id: Option<i64>,
    pub category_id: Option<i64>,
}

impl ProductFilter {
    /// Filter selecting only published products.
    pub fn published() -> Self {
        Self {
            status: Some(ProductStatus::Published),
            ..Self::default()
        }
    }

    /// Returns true if `product` satisfies every set criterion.
    pub fn matches(&self, product: &Product) -> bool {
        self.status.is_none_or(|s| product.status == s)
            && self.user_id.is_none_or(|u| product.user_id == u)
            && self
                .category_id
                .is_none_or(|c| product.category_id == Some(c))
    }
}
