use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rms::router::init_router;
use rms::state::AppState;
use rms_auth::Role;
use rms_config::{CorsConfig, JwtConfig};
use rms_core::hash_password;
use rms_models::{AddressId, RestaurantId, UserId};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "secret1";

#[allow(dead_code)]
pub struct TestCredential {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub role: Role,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-secret-key-at-least-32-characters".to_string(),
        access_token_expiry: 7200,
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Inserts a credential directly. `created_by: None` makes it its own creator.
pub async fn create_test_credential(
    pool: &PgPool,
    role: Role,
    created_by: Option<UserId>,
) -> TestCredential {
    let id = UserId::new();
    let email = generate_unique_email();
    let hashed = hash_password(TEST_PASSWORD).unwrap();

    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password, role, created_by)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind("Test User")
    .bind(&email)
    .bind(&hashed)
    .bind(role)
    .bind(created_by.unwrap_or(id))
    .execute(pool)
    .await
    .unwrap();

    TestCredential {
        id,
        email,
        password: TEST_PASSWORD.to_string(),
        role,
    }
}

#[allow(dead_code)]
pub async fn create_test_address(
    pool: &PgPool,
    user_id: UserId,
    address: &str,
    latitude: f64,
    longitude: f64,
) -> AddressId {
    let id = AddressId::new();
    sqlx::query(
        r#"
        INSERT INTO addresses (id, address, latitude, longitude, user_id)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(address)
    .bind(latitude)
    .bind(longitude)
    .bind(user_id)
    .execute(pool)
    .await
    .unwrap();
    id
}

#[allow(dead_code)]
pub async fn create_test_restaurant(
    pool: &PgPool,
    name: &str,
    latitude: f64,
    longitude: f64,
    created_by: UserId,
) -> RestaurantId {
    let id = RestaurantId::new();
    sqlx::query(
        r#"
        INSERT INTO restaurants (id, name, address, latitude, longitude, created_by)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind(name)
    .bind("1 Test Street")
    .bind(latitude)
    .bind(longitude)
    .bind(created_by)
    .execute(pool)
    .await
    .unwrap();
    id
}

/// Sends a request and returns the status with the parsed JSON body
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/v1/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

/// Seeds a credential of `role` and logs it in.
#[allow(dead_code)]
pub async fn login_as(app: &Router, pool: &PgPool, role: Role) -> (TestCredential, String) {
    let credential = create_test_credential(pool, role, None).await;
    let token = login(app, &credential.email, &credential.password).await;
    (credential, token)
}
