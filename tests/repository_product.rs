//! PostgreSQL repository tests. Run with `cargo test --features pg-tests`
//! against a database reachable through `DATABASE_URL`.
#![cfg(feature = "pg-tests")]

use marketplace_catalog::domain::entities::{
    NewProduct, ProductFilter, ProductPatch, ProductStatus, Reference,
};
use marketplace_catalog::domain::repositories::{ProductRepository, ReferenceLookup};
use marketplace_catalog::error::AppError;
use marketplace_catalog::infrastructure::persistence::{
    PgProductRepository, PgReferenceRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

fn new_product(user_id: i64, title: &str, status: ProductStatus) -> NewProduct {
    NewProduct {
        user_id,
        category_id: None,
        title: title.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        description: None,
        condition: Some("new".to_string()),
        stock: Some(5),
        upc: None,
        sku: None,
        price: Some(9.99),
        publication_type: None,
        warranty_type: None,
        warranty_duration: None,
        warranty_duration_type: None,
        status,
    }
}

#[sqlx::test]
async fn test_create_and_find_product(pool: PgPool) {
    let pool = Arc::new(pool);
    let refs = PgReferenceRepository::new(pool.clone());
    let user = refs.create_user("Ana").await.unwrap();
    let repo = PgProductRepository::new(pool);

    let created = repo
        .create(new_product(user.id, "Yerba Mate", ProductStatus::Published))
        .await
        .unwrap();

    assert_eq!(created.title, "Yerba Mate");
    assert_eq!(created.status, ProductStatus::Published);
    assert_eq!(created.price, Some(9.99));

    let found = repo.find(created.id).await.unwrap().unwrap();
    assert_eq!(found, created);
    assert!(repo.find(created.id + 1000).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_create_product_unknown_owner_conflicts(pool: PgPool) {
    let repo = PgProductRepository::new(Arc::new(pool));

    let err = repo
        .create(new_product(424242, "Huérfano", ProductStatus::Draft))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[sqlx::test]
async fn test_list_filters_and_orders(pool: PgPool) {
    let pool = Arc::new(pool);
    let refs = PgReferenceRepository::new(pool.clone());
    let ana = refs.create_user("Ana").await.unwrap();
    let luis = refs.create_user("Luis").await.unwrap();
    let repo = PgProductRepository::new(pool);

    let first = repo
        .create(new_product(ana.id, "Uno", ProductStatus::Published))
        .await
        .unwrap();
    repo.create(new_product(ana.id, "Dos", ProductStatus::Draft))
        .await
        .unwrap();
    let third = repo
        .create(new_product(luis.id, "Tres", ProductStatus::Published))
        .await
        .unwrap();

    let published = repo.list(ProductFilter::published()).await.unwrap();
    let ids: Vec<i64> = published.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![third.id, first.id]);

    let by_owner = repo
        .list(ProductFilter {
            user_id: Some(ana.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_owner.len(), 2);

    assert_eq!(repo.list(ProductFilter::default()).await.unwrap().len(), 3);
}

#[sqlx::test]
async fn test_update_product(pool: PgPool) {
    let pool = Arc::new(pool);
    let refs = PgReferenceRepository::new(pool.clone());
    let user = refs.create_user("Ana").await.unwrap();
    let repo = PgProductRepository::new(pool);
    let created = repo
        .create(new_product(user.id, "Viejo", ProductStatus::Draft))
        .await
        .unwrap();

    let updated = repo
        .update(
            created.id,
            ProductPatch {
                title: Some("Nuevo".to_string()),
                slug: Some("nuevo".to_string()),
                status: Some(ProductStatus::Paused),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Nuevo");
    assert_eq!(updated.slug, "nuevo");
    assert_eq!(updated.status, ProductStatus::Paused);
    assert_eq!(updated.price, created.price);
    assert!(updated.updated_at >= created.updated_at);

    let missing = repo
        .update(created.id + 1000, ProductPatch::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
async fn test_delete_product(pool: PgPool) {
    let pool = Arc::new(pool);
    let refs = PgReferenceRepository::new(pool.clone());
    let user = refs.create_user("Ana").await.unwrap();
    let repo = PgProductRepository::new(pool);
    let created = repo
        .create(new_product(user.id, "Efímero", ProductStatus::Closed))
        .await
        .unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert!(!refs.exists(Reference::Products, created.id).await.unwrap());
}

#[sqlx::test]
async fn test_reference_lookup(pool: PgPool) {
    let refs = PgReferenceRepository::new(Arc::new(pool));
    let user = refs.create_user("Ana").await.unwrap();
    let category = refs.create_category("Bebidas").await.unwrap();

    assert!(refs.exists(Reference::Users, user.id).await.unwrap());
    assert!(refs.exists(Reference::Categories, category.id).await.unwrap());
    assert!(!refs.exists(Reference::Categories, category.id + 1).await.unwrap());

    let duplicate = refs.create_category("Bebidas").await.unwrap_err();
    assert!(matches!(duplicate, AppError::Conflict { .. }));

    assert_eq!(refs.list_users().await.unwrap().len(), 1);
    assert_eq!(refs.list_categories().await.unwrap()[0].name, "Bebidas");
}
