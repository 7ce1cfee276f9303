//! Shared harness for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use hotelix_api::{build_router, AppContext};
use hotelix_common::crypto::PasswordHasher;
use hotelix_common::testing::TempDir;
use hotelix_common::time::MockClock;
use hotelix_core::ZoneRepository;
use hotelix_domain::{Config, DatabaseConfig, TypeZone, Zone};
use hotelix_infra::database::{DbManager, SqliteZoneRepository};
use serde_json::{json, Value};
use tower::ServiceExt;

/// 2025-03-20T12:00:00Z
pub const PINNED_SECS: u64 = 1_742_472_000;

/// Router over a seeded temporary database and a pinned clock.
pub struct TestApp {
    pub ctx: Arc<AppContext>,
    pub clock: MockClock,
    router: Router,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let temp_dir = TempDir::new("hotelix-api-test").expect("temp dir should be created");
        let config = Config {
            database: DatabaseConfig {
                path: temp_dir.db_path("api").display().to_string(),
                pool_size: 4,
                seed_defaults: true,
            },
            ..Config::default()
        };

        let db = Arc::new(DbManager::from_config(&config.database).expect("database opened"));
        let clock = MockClock::starting_at(UNIX_EPOCH + Duration::from_secs(PINNED_SECS));
        let hasher = PasswordHasher::with_cost(64, 1).expect("cheap hasher");
        let ctx =
            Arc::new(AppContext::from_parts(config, db, Arc::new(clock.clone()), hasher));

        Self { router: build_router(Arc::clone(&ctx)), ctx, clock, _temp_dir: temp_dir }
    }

    /// Send a request and decode the JSON response body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request built"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body read");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    /// Register an account through the API and return its id.
    pub async fn register(&self, email: &str, role: &str, hotel_id: i64) -> i64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/register",
                Some(json!({
                    "email": email,
                    "password": "secret1",
                    "confirmPassword": "secret1",
                    "name": email.split('@').next(),
                    "hotelId": hotel_id,
                    "role": role,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["data"]["id"].as_i64().expect("session id")
    }

    pub async fn zone(&self, hotel_id: i64, nom: &str) -> Zone {
        SqliteZoneRepository::new(Arc::clone(&self.ctx.db))
            .create_zone(hotel_id, nom, TypeZone::Chambre)
            .await
            .expect("zone created")
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
