#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use marketplace_catalog::domain::entities::{Category, User};
use marketplace_catalog::infrastructure::memory::MemoryStore;
use marketplace_catalog::routes::{app_router, router};
use marketplace_catalog::server::memory_state;
use marketplace_catalog::state::AppState;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::normalize_path::NormalizePath;

/// Seeded in-memory backend shared by a test and its server.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub user: User,
    pub category: Category,
}

pub async fn create_test_context() -> TestContext {
    let store = Arc::new(MemoryStore::new());
    let user = store.add_user("Ana").await;
    let category = store.add_category("Café y té").await;

    TestContext {
        store,
        user,
        category,
    }
}

pub fn create_test_state(ctx: &TestContext) -> AppState {
    memory_state(ctx.store.clone())
}

pub fn create_test_server(ctx: &TestContext) -> TestServer {
    TestServer::new(router(create_test_state(ctx))).unwrap()
}

/// The service as shipped, with trailing-slash normalization in front.
pub fn create_test_app(ctx: &TestContext) -> NormalizePath<Router> {
    app_router(create_test_state(ctx))
}

/// Creates a product through the API and returns its JSON representation.
pub async fn create_test_product(
    server: &TestServer,
    ctx: &TestContext,
    title: &str,
    status: &str,
) -> Value {
    let response = server
        .post("/api/products")
        .json(&json!({
            "user_id": ctx.user.id,
            "category_id": ctx.category.id,
            "title": title,
            "status": status,
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["product"].clone()
}
