//! Common test utilities for integration tests
//!
//! Every test gets its own router over fresh in-memory stores, so tests run
//! in parallel without a database:
//! - Seeded administrator (`admin` / `admin123`)
//! - One CLIENT user (`maria` / `client123`)
//! - Request and response helpers

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use dealership_api::app::{build_router, AppState};
use dealership_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use dealership_shared::auth::{jwt::TokenIssuer, password};
use dealership_shared::models::user::{CreateUser, Role};
use dealership_shared::seed::{seed_admin, AdminSeed};
use dealership_shared::store::memory::{MemoryUserStore, MemoryVehicleStore};
use dealership_shared::store::UserStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const CLIENT_USERNAME: &str = "maria";
pub const CLIENT_PASSWORD: &str = "client123";

/// Test context containing all necessary resources
pub struct TestContext {
    pub app: Router,
    pub users: Arc<MemoryUserStore>,
    pub vehicles: Arc<MemoryVehicleStore>,
    pub tokens: TokenIssuer,
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            expiration_hours: 24,
        },
        admin: AdminSeed {
            username: ADMIN_USERNAME.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        },
    }
}

impl TestContext {
    /// Builds the router over seeded in-memory stores
    pub async fn new() -> anyhow::Result<Self> {
        let config = test_config();

        let users = Arc::new(MemoryUserStore::new());
        let vehicles = Arc::new(MemoryVehicleStore::new());

        seed_admin(users.as_ref(), &config.admin).await?;
        users
            .create(CreateUser {
                username: CLIENT_USERNAME.to_string(),
                password_hash: password::hash_password(CLIENT_PASSWORD)?,
                role: Role::Client,
            })
            .await?;

        let tokens = TokenIssuer::new(&config.jwt.secret, config.jwt.expiration_hours);
        let state = AppState::new(users.clone(), vehicles.clone(), config);

        Ok(TestContext {
            app: build_router(state),
            users,
            vehicles,
            tokens,
        })
    }

    /// Sends one request through a clone of the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// Logs in through `POST /login` and returns the token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/login",
                None,
                Some(json!({ "username": username, "password": password })),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK, "login as {} failed", username);

        let body = body_json(response).await;
        body["token"].as_str().expect("token in login response").to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    pub async fn client_token(&self) -> String {
        self.login(CLIENT_USERNAME, CLIENT_PASSWORD).await
    }

    /// Creates a vehicle as admin and returns the response body
    pub async fn create_vehicle(&self, body: Value) -> Value {
        let token = self.admin_token().await;
        let response = self
            .send(json_request("POST", "/vehicles", Some(&token), Some(body)))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }
}

/// Helper to create a test request with an optional bearer token and JSON body
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// A valid vehicle body
pub fn corolla() -> Value {
    json!({
        "brand": "Toyota",
        "model": "Corolla",
        "year": 2020,
        "price": 18500.0,
        "mileage": 42000,
        "fuel_type": "Hybrid",
        "description": "One owner, full service history",
        "image_urls": ["https://cdn.example.com/corolla-1.jpg"]
    })
}

pub fn golf() -> Value {
    json!({
        "brand": "Volkswagen",
        "model": "Golf",
        "year": 2017,
        "price": 12900.0,
        "mileage": 98000,
        "fuel_type": "Diesel"
    })
}
