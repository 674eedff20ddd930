//! Product management and search service.

use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::application::validation::{FieldKind, FieldRule, RuleSet, validate_payload};
use crate::domain::entities::{
    NewProduct, Product, ProductFilter, ProductPatch, ProductStatus, Reference,
};
use crate::domain::repositories::{ProductRepository, ReferenceLookup};
use crate::domain::search;
use crate::error::AppError;
use crate::utils::slug::slugify;

const TITLE: FieldRule = FieldRule::sometimes(FieldKind::String).max_length(255);
const DESCRIPTION: FieldRule = FieldRule::sometimes(FieldKind::String);
const TEXT: FieldRule = FieldRule::sometimes(FieldKind::String).max_length(255);
const COUNT: FieldRule = FieldRule::sometimes(FieldKind::Integer).min(0.0);
const PRICE: FieldRule = FieldRule::sometimes(FieldKind::Numeric).min(0.0);
const CATEGORY: FieldRule = FieldRule::sometimes(FieldKind::Integer).exists(Reference::Categories);

/// Field rules for `POST /api/products`.
pub const CREATE_PRODUCT_RULES: RuleSet = &[
    ("title", TITLE),
    ("description", DESCRIPTION),
    ("condition", TEXT),
    ("stock", COUNT),
    ("upc", TEXT),
    ("sku", TEXT),
    ("price", PRICE),
    ("publication_type", TEXT),
    ("warranty_type", TEXT),
    ("warranty_duration", COUNT),
    ("warranty_duration_type", TEXT),
    (
        "status",
        FieldRule::required(FieldKind::String).one_of(ProductStatus::NAMES),
    ),
    ("category_id", CATEGORY),
    (
        "user_id",
        FieldRule::required(FieldKind::Integer).exists(Reference::Users),
    ),
];

/// Field rules for `PUT/PATCH /api/products/{id}`. The owner cannot change.
pub const UPDATE_PRODUCT_RULES: RuleSet = &[
    ("title", TITLE),
    ("description", DESCRIPTION),
    ("condition", TEXT),
    ("stock", COUNT),
    ("upc", TEXT),
    ("sku", TEXT),
    ("price", PRICE),
    ("publication_type", TEXT),
    ("warranty_type", TEXT),
    ("warranty_duration", COUNT),
    ("warranty_duration_type", TEXT),
    (
        "status",
        FieldRule::sometimes(FieldKind::String).one_of(ProductStatus::NAMES),
    ),
    ("category_id", CATEGORY),
];

/// Typed view of a validated product body. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct ProductInput {
    user_id: Option<i64>,
    category_id: Option<i64>,
    title: Option<String>,
    description: Option<String>,
    condition: Option<String>,
    stock: Option<i64>,
    upc: Option<String>,
    sku: Option<String>,
    price: Option<f64>,
    publication_type: Option<String>,
    warranty_type: Option<String>,
    warranty_duration: Option<i64>,
    warranty_duration_type: Option<String>,
    status: Option<ProductStatus>,
}

impl ProductInput {
    fn parse(payload: &Value) -> Result<Self, AppError> {
        Self::deserialize(payload).map_err(|e| {
            AppError::bad_request("Validation failed", json!({ "body": [e.to_string()] }))
        })
    }
}

/// Service for product CRUD, filtered listing, and text search.
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    references: Arc<dyn ReferenceLookup>,
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(products: Arc<dyn ProductRepository>, references: Arc<dyn ReferenceLookup>) -> Self {
        Self {
            products,
            references,
        }
    }

    /// Lists products by attribute equality, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_products(&self, filter: ProductFilter) -> Result<Vec<Product>, AppError> {
        self.products.list(filter).await
    }

    /// Searches published products by title and description, ignoring case
    /// and accents. Newest first.
    ///
    /// The query is trimmed; an absent or blank query returns every published
    /// product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn search_products(&self, query: Option<&str>) -> Result<Vec<Product>, AppError> {
        let query = query.map(str::trim).unwrap_or_default();

        let candidates = self.products.list(ProductFilter::published()).await?;
        let scanned = candidates.len();

        let matches = search::search(query, candidates);

        tracing::debug!(query, scanned, matched = matches.len(), "Product search");
        Ok(matches)
    }

    /// Retrieves a product by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the product does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_product(&self, id: i64) -> Result<Product, AppError> {
        self.products
            .find(id)
            .await?
            .ok_or_else(|| product_not_found(id))
    }

    /// Validates `payload` against [`CREATE_PRODUCT_RULES`] and creates the
    /// product. The slug is derived from the title.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with field-level messages on invalid input.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create_product(&self, payload: &Value) -> Result<Product, AppError> {
        validate_payload(payload, CREATE_PRODUCT_RULES, self.references.as_ref()).await?;
        let input = ProductInput::parse(payload)?;

        let (Some(user_id), Some(status)) = (input.user_id, input.status) else {
            return Err(AppError::bad_request(
                "Validation failed",
                json!({ "body": ["user_id and status are required"] }),
            ));
        };

        let title = input.title.unwrap_or_default();
        let new_product = NewProduct {
            user_id,
            category_id: input.category_id,
            slug: slugify(&title),
            title,
            description: input.description,
            condition: input.condition,
            stock: input.stock,
            upc: input.upc,
            sku: input.sku,
            price: input.price,
            publication_type: input.publication_type,
            warranty_type: input.warranty_type,
            warranty_duration: input.warranty_duration,
            warranty_duration_type: input.warranty_duration_type,
            status,
        };

        let product = self.products.create(new_product).await?;
        tracing::info!(product_id = product.id, user_id, "Product created");
        Ok(product)
    }

    /// Validates `payload` against [`UPDATE_PRODUCT_RULES`] and applies it.
    /// A new title re-derives the slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with field-level messages on invalid input.
    /// Returns [`AppError::NotFound`] if the product does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn update_product(&self, id: i64, payload: &Value) -> Result<Product, AppError> {
        validate_payload(payload, UPDATE_PRODUCT_RULES, self.references.as_ref()).await?;
        let input = ProductInput::parse(payload)?;

        let patch = ProductPatch {
            category_id: input.category_id,
            slug: input.title.as_deref().map(slugify),
            title: input.title,
            description: input.description,
            condition: input.condition,
            stock: input.stock,
            upc: input.upc,
            sku: input.sku,
            price: input.price,
            publication_type: input.publication_type,
            warranty_type: input.warranty_type,
            warranty_duration: input.warranty_duration,
            warranty_duration_type: input.warranty_duration_type,
            status: input.status,
        };

        let product = self
            .products
            .update(id, patch)
            .await?
            .ok_or_else(|| product_not_found(id))?;

        tracing::info!(product_id = id, "Product updated");
        Ok(product)
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the product does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete_product(&self, id: i64) -> Result<(), AppError> {
        if !self.products.delete(id).await? {
            return Err(product_not_found(id));
        }

        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }
}

fn product_not_found(id: i64) -> AppError {
    AppError::not_found("Product not found", json!({ "id": id }))
}
