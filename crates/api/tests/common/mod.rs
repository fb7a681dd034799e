//! Shared helpers for API integration tests.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;

use orderdesk_api::auth::jwt::{generate_access_token, JwtConfig};
use orderdesk_api::auth::password::hash_password;
use orderdesk_api::config::ServerConfig;
use orderdesk_api::router::build_app_router;
use orderdesk_api::state::AppState;
use orderdesk_db::models::customer::CreateCustomer;
use orderdesk_db::models::user::CreateUser;
use orderdesk_db::repositories::{CustomerRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the router construction in `main.rs` so
/// integration tests exercise the same stack production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Create a test user and return `(user_id, bearer_token)`.
pub async fn seed_user(pool: &PgPool) -> (i64, String) {
    let password_hash = hash_password("builder-pass").expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: "tester".to_string(),
            email: "tester@example.com".to_string(),
            password_hash,
            role: "admin".to_string(),
        },
    )
    .await
    .expect("user creation should succeed");

    let token = generate_access_token(user.id, &user.role, &test_config().jwt)
        .expect("token generation should succeed");

    (user.id, token)
}

/// Create a test customer and return its id.
pub async fn seed_customer(pool: &PgPool) -> i64 {
    CustomerRepo::create(
        pool,
        &CreateCustomer {
            company_name: "Acme Builders".to_string(),
            customer_type: "RESIDENTIAL".to_string(),
            contact_first_name: None,
            contact_last_name: None,
            email: None,
            phone: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            notes: None,
        },
    )
    .await
    .expect("customer creation should succeed")
    .id
}

/// Issue a request against the router, returning status and parsed JSON
/// body (or `Value::Null` for empty bodies).
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}
