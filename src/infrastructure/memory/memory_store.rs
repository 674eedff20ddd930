//! `BTreeMap`-backed implementation of the repository traits.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{
    Category, NewProduct, NewWishlistItem, Product, ProductFilter, ProductPatch, Reference, User,
    WishlistItem, WishlistPatch,
};
use crate::domain::repositories::{
    ProductRepository, ReferenceLookup, StorageProbe, WishlistRepository,
};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    last_id: i64,
    users: BTreeMap<i64, User>,
    categories: BTreeMap<i64, Category>,
    products: BTreeMap<i64, Product>,
    wishlists: BTreeMap<i64, WishlistItem>,
}

impl Tables {
    /// IDs are unique across tables, which keeps test fixtures unambiguous.
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn contains(&self, reference: Reference, id: i64) -> bool {
        match reference {
            Reference::Users => self.users.contains_key(&id),
            Reference::Categories => self.categories.contains_key(&id),
            Reference::Products => self.products.contains_key(&id),
        }
    }

    fn require(&self, reference: Reference, id: i64) -> Result<(), AppError> {
        if self.contains(reference, id) {
            Ok(())
        } else {
            Err(AppError::conflict(
                "Referenced record does not exist or is still in use",
                json!({ "table": reference.table(), "id": id }),
            ))
        }
    }
}

/// Storage backend living entirely in process memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using in-memory storage");
        Self::default()
    }

    /// Inserts a user. Users have no HTTP API; this seeds them.
    pub async fn add_user(&self, name: impl Into<String>) -> User {
        let mut tables = self.tables.write().await;
        let user = User {
            id: tables.next_id(),
            name: name.into(),
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        user
    }

    /// Inserts a category. Categories have no HTTP API; this seeds them.
    pub async fn add_category(&self, name: impl Into<String>) -> Category {
        let mut tables = self.tables.write().await;
        let category = Category {
            id: tables.next_id(),
            name: name.into(),
            created_at: Utc::now(),
        };
        tables.categories.insert(category.id, category.clone());
        category
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn find(&self, id: i64) -> Result<Option<Product>, AppError> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> Result<Vec<Product>, AppError> {
        let tables = self.tables.read().await;
        let mut products: Vec<Product> = tables
            .products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(products)
    }

    async fn create(&self, new_product: NewProduct) -> Result<Product, AppError> {
        let mut tables = self.tables.write().await;

        tables.require(Reference::Users, new_product.user_id)?;
        if let Some(category_id) = new_product.category_id {
            tables.require(Reference::Categories, category_id)?;
        }

        let now = Utc::now();
        let product = Product {
            id: tables.next_id(),
            user_id: new_product.user_id,
            category_id: new_product.category_id,
            title: new_product.title,
            slug: new_product.slug,
            description: new_product.description,
            condition: new_product.condition,
            stock: new_product.stock,
            upc: new_product.upc,
            sku: new_product.sku,
            price: new_product.price,
            publication_type: new_product.publication_type,
            warranty_type: new_product.warranty_type,
            warranty_duration: new_product.warranty_duration,
            warranty_duration_type: new_product.warranty_duration_type,
            status: new_product.status,
            created_at: now,
            updated_at: now,
        };

        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i64, patch: ProductPatch) -> Result<Option<Product>, AppError> {
        let mut tables = self.tables.write().await;

        if let Some(category_id) = patch.category_id {
            tables.require(Reference::Categories, category_id)?;
        }

        let Some(product) = tables.products.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply_to(product);
        product.updated_at = Utc::now();

        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;

        if tables.products.remove(&id).is_none() {
            return Ok(false);
        }
        tables.wishlists.retain(|_, item| item.product_id != id);
        Ok(true)
    }
}

#[async_trait]
impl WishlistRepository for MemoryStore {
    async fn find(&self, id: i64) -> Result<Option<WishlistItem>, AppError> {
        Ok(self.tables.read().await.wishlists.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<WishlistItem>, AppError> {
        Ok(self.tables.read().await.wishlists.values().cloned().collect())
    }

    async fn create(&self, new_item: NewWishlistItem) -> Result<WishlistItem, AppError> {
        let mut tables = self.tables.write().await;

        tables.require(Reference::Users, new_item.user_id)?;
        tables.require(Reference::Products, new_item.product_id)?;

        let now = Utc::now();
        let item = WishlistItem {
            id: tables.next_id(),
            user_id: new_item.user_id,
            product_id: new_item.product_id,
            created_at: now,
            updated_at: now,
        };

        tables.wishlists.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        id: i64,
        patch: WishlistPatch,
    ) -> Result<Option<WishlistItem>, AppError> {
        let mut tables = self.tables.write().await;

        if let Some(product_id) = patch.product_id {
            tables.require(Reference::Products, product_id)?;
        }

        let Some(item) = tables.wishlists.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply_to(item);
        item.updated_at = Utc::now();

        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.write().await.wishlists.remove(&id).is_some())
    }
}

#[async_trait]
impl ReferenceLookup for MemoryStore {
    async fn exists(&self, reference: Reference, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.read().await.contains(reference, id))
    }
}

#[async_trait]
impl StorageProbe for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ProductStatus;

    fn new_product(user_id: i64, title: &str, status: ProductStatus) -> NewProduct {
        NewProduct {
            user_id,
            category_id: None,
            title: title.to_string(),
            slug: crate::utils::slug::slugify(title),
            description: None,
            condition: None,
            stock: None,
            upc: None,
            sku: None,
            price: None,
            publication_type: None,
            warranty_type: None,
            warranty_duration: None,
            warranty_duration_type: None,
            status,
        }
    }

    #[tokio::test]
    async fn test_product_crud() {
        let store = MemoryStore::new();
        let user = store.add_user("ana").await;
        let created = ProductRepository::create(
            &store,
            new_product(user.id, "Silla", ProductStatus::Draft),
        )
        .await
        .unwrap();
        assert_eq!(created.slug, "silla");

        let found = ProductRepository::find(&store, created.id).await.unwrap();
        assert_eq!(found, Some(created.clone()));

        let updated = ProductRepository::update(
            &store,
            created.id,
            ProductPatch {
                stock: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.stock, Some(3));
        assert!(updated.updated_at >= created.updated_at);

        assert!(ProductRepository::delete(&store, created.id).await.unwrap());
        assert!(!ProductRepository::delete(&store, created.id).await.unwrap());
        assert!(ProductRepository::find(&store, created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_product_requires_existing_user() {
        let store = MemoryStore::new();

        let err = ProductRepository::create(&store, new_product(404, "x", ProductStatus::Draft))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_newest_first() {
        let store = MemoryStore::new();
        let user = store.add_user("ana").await;
        let other = store.add_user("luis").await;
        let a = ProductRepository::create(
            &store,
            new_product(user.id, "A", ProductStatus::Published),
        )
        .await
        .unwrap();
        let b = ProductRepository::create(
            &store,
            new_product(other.id, "B", ProductStatus::Draft),
        )
        .await
        .unwrap();
        let c = ProductRepository::create(
            &store,
            new_product(user.id, "C", ProductStatus::Published),
        )
        .await
        .unwrap();

        let all = ProductRepository::list(&store, ProductFilter::default()).await.unwrap();
        let ids: Vec<i64> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);

        let published = ProductRepository::list(&store, ProductFilter::published())
            .await
            .unwrap();
        assert_eq!(published.len(), 2);

        let by_other = ProductRepository::list(
            &store,
            ProductFilter {
                user_id: Some(other.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_other.len(), 1);
        assert_eq!(by_other[0].id, b.id);
    }

    #[tokio::test]
    async fn test_deleting_product_removes_wishlist_entries() {
        let store = MemoryStore::new();
        let user = store.add_user("ana").await;
        let product = ProductRepository::create(
            &store,
            new_product(user.id, "x", ProductStatus::Published),
        )
        .await
        .unwrap();

        let item = WishlistRepository::create(
            &store,
            NewWishlistItem {
                user_id: user.id,
                product_id: product.id,
            },
        )
        .await
        .unwrap();

        ProductRepository::delete(&store, product.id).await.unwrap();
        assert!(WishlistRepository::find(&store, item.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reference_lookup() {
        let store = MemoryStore::new();
        let user = store.add_user("ana").await;
        let category = store.add_category("hogar").await;

        assert!(store.exists(Reference::Users, user.id).await.unwrap());
        assert!(store.exists(Reference::Categories, category.id).await.unwrap());
        assert!(!store.exists(Reference::Users, category.id).await.unwrap());
        assert!(!store.exists(Reference::Products, user.id).await.unwrap());
    }
}
