use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use stockroom_api::{config::AppConfig, db, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

/// Helper harness running the full router over a fresh SQLite file database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _db_dir: TempDir,
}

impl TestApp {
    /// Construct a new test application with an empty, migrated database.
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().expect("failed to create temp dir");
        let db_path = db_dir.path().join("stockroom_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.database.max_connections = 1;
        cfg.database.min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = stockroom_api::build_router(state.clone());

        Self {
            router,
            state,
            _db_dir: db_dir,
        }
    }

    /// Send a request with an optional JSON body and optional `X-Supplier-ID` header value.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        supplier: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(supplier) = supplier {
            builder = builder.header("x-supplier-id", supplier);
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    #[allow(dead_code)]
    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, None, None).await
    }

    /// Creates a supplier and returns its id.
    #[allow(dead_code)]
    pub async fn seed_supplier(&self, name: &str) -> i64 {
        let response = self
            .request(Method::POST, "/suppliers", Some(json!({ "name": name })), None)
            .await;
        assert_eq!(response.status(), 201, "seeding supplier {}", name);
        response_json(response).await["data"]["id"]
            .as_i64()
            .expect("supplier id")
    }

    /// Creates an inventory item owned by `supplier_id` and returns its id.
    #[allow(dead_code)]
    pub async fn seed_item(&self, supplier_id: i64, name: &str, quantity: i32) -> i64 {
        let response = self
            .request(
                Method::POST,
                "/inventory",
                Some(json!({ "name": name, "category": "Fasteners", "quantity": quantity })),
                Some(&supplier_id.to_string()),
            )
            .await;
        assert_eq!(response.status(), 201, "seeding item {}", name);
        response_json(response).await["data"]["id"]
            .as_i64()
            .expect("item id")
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
