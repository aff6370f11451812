mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use common::{
    TEST_PASSWORD, create_test_credential, generate_unique_email, login, login_as, send,
    setup_test_app, test_jwt_config,
};
use rms::modules::auth::session::SessionService;
use rms_auth::{Role, create_token_with_ttl, verify_token};
use rms_config::JwtConfig;
use rms_models::SessionId;
use serde_json::json;
use sqlx::PgPool;
use std::time::{Duration as StdDuration, Instant};
use uuid::Uuid;

async fn session_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM user_session")
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn session_archived_at(pool: &PgPool, session_id: SessionId) -> Option<DateTime<Utc>> {
    sqlx::query_scalar("SELECT archived_at FROM user_session WHERE id = $1")
        .bind(session_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_check_is_open(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/v1/check", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let credential = create_test_credential(&pool, Role::SubAdmin, None).await;

    let (status, body) = send(
        &app,
        "POST",
        "/v1/login",
        None,
        Some(json!({ "email": credential.email, "password": TEST_PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "Login success");

    let claims = verify_token(body["token"].as_str().unwrap(), &test_jwt_config()).unwrap();
    assert_eq!(claims.user_id, credential.id.into_inner());
    assert_eq!(claims.role, Role::SubAdmin);

    // The session is live from the moment the token is issued.
    let live: bool = sqlx::query_scalar(
        "SELECT archived_at IS NULL FROM user_session WHERE id = $1 AND user_id = $2",
    )
    .bind(claims.session_id)
    .bind(credential.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(live);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let credential = create_test_credential(&pool, Role::User, None).await;

    let (unknown_status, unknown_body) = send(
        &app,
        "POST",
        "/v1/login",
        None,
        Some(json!({ "email": generate_unique_email(), "password": TEST_PASSWORD })),
    )
    .await;

    let (wrong_status, wrong_body) = send(
        &app,
        "POST",
        "/v1/login",
        None,
        Some(json!({ "email": credential.email, "password": "wrong-pass" })),
    )
    .await;

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_body, wrong_body);
    assert_eq!(unknown_body["error"], "Invalid email or password");

    assert_eq!(session_count(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_archived_credential_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let credential = create_test_credential(&pool, Role::User, None).await;

    sqlx::query("UPDATE users SET archived_at = NOW() WHERE id = $1")
        .bind(credential.id)
        .execute(&pool)
        .await
        .unwrap();

    let (status, _) = send(
        &app,
        "POST",
        "/v1/login",
        None,
        Some(json!({ "email": credential.email, "password": TEST_PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_invalid_email_format(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        "/v1/login",
        None,
        Some(json!({ "email": "not-an-email", "password": TEST_PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_missing_password(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/v1/login",
        None,
        Some(json!({ "email": "test@test.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "password is required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_logout_revokes_session(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let (credential, token) = login_as(&app, &pool, Role::User).await;

    let (status, body) = send(&app, "GET", "/v1/info", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["version"].is_string());

    let (status, body) = send(&app, "POST", "/v1/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Logout success");
    assert_eq!(body["userId"], credential.id.to_string());

    // The token has not expired, but its session is gone.
    let (status, body) = send(&app, "GET", "/v1/info", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");

    let (status, _) = send(&app, "POST", "/v1/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let archived: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM user_session WHERE archived_at IS NOT NULL")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(archived, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_logout_leaves_other_sessions_alive(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let credential = create_test_credential(&pool, Role::User, None).await;

    let first = login(&app, &credential.email, TEST_PASSWORD).await;
    let second = login(&app, &credential.email, TEST_PASSWORD).await;

    let (status, _) = send(&app, "POST", "/v1/logout", Some(&first), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/v1/info", Some(&second), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rejected_tokens_share_one_response(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let (_, token) = login_as(&app, &pool, Role::Admin).await;
    let claims = verify_token(&token, &test_jwt_config()).unwrap();

    let expired = create_token_with_ttl(
        claims.user_id,
        claims.role,
        claims.session_id,
        Duration::seconds(-30),
        &test_jwt_config(),
    )
    .unwrap();

    let forged = create_token_with_ttl(
        claims.user_id,
        claims.role,
        claims.session_id,
        Duration::hours(1),
        &JwtConfig {
            secret: "some-other-secret-at-least-32-characters".to_string(),
            access_token_expiry: 3600,
        },
    )
    .unwrap();

    let (expired_status, expired_body) =
        send(&app, "GET", "/v1/info", Some(&expired), None).await;
    let (forged_status, forged_body) = send(&app, "GET", "/v1/info", Some(&forged), None).await;
    let (garbage_status, garbage_body) =
        send(&app, "GET", "/v1/info", Some("not.a.token"), None).await;
    let (missing_status, missing_body) = send(&app, "GET", "/v1/info", None, None).await;

    for status in [expired_status, forged_status, garbage_status, missing_status] {
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
    assert_eq!(expired_body, forged_body);
    assert_eq!(forged_body, garbage_body);
    assert_eq!(garbage_body, missing_body);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_for_archived_owner_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let (credential, token) = login_as(&app, &pool, Role::User).await;

    sqlx::query("UPDATE users SET archived_at = NOW() WHERE id = $1")
        .bind(credential.id)
        .execute(&pool)
        .await
        .unwrap();

    let (status, _) = send(&app, "GET", "/v1/info", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_with_mismatched_user_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let (_, token) = login_as(&app, &pool, Role::User).await;
    let other = create_test_credential(&pool, Role::User, None).await;
    let claims = verify_token(&token, &test_jwt_config()).unwrap();

    // Valid signature, live session, but the session belongs to someone else.
    let mismatched = create_token_with_ttl(
        other.id.into_inner(),
        Role::User,
        claims.session_id,
        Duration::hours(1),
        &test_jwt_config(),
    )
    .unwrap();

    let (status, _) = send(&app, "GET", "/v1/info", Some(&mismatched), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_creates_user_with_addresses(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let email = generate_unique_email();

    let payload = json!({
        "name": "Asha Rao",
        "email": email,
        "password": TEST_PASSWORD,
        "addresses": [
            { "address": "12 MG Road", "latitude": 12.97, "longitude": 77.59 },
            { "address": "7 Anna Salai", "latitude": 13.08, "longitude": 80.27 }
        ]
    });

    let (status, body) = send(&app, "POST", "/v1/signup", None, Some(payload.clone())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["role"], "user");
    assert_eq!(body["createdBy"], body["id"]);
    assert_eq!(body["addresses"].as_array().unwrap().len(), 2);
    assert!(body.get("password").is_none());

    let token = login(&app, &email, TEST_PASSWORD).await;
    assert_eq!(
        verify_token(&token, &test_jwt_config()).unwrap().role,
        Role::User
    );

    let (status, body) = send(&app, "POST", "/v1/signup", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_rejects_invalid_name(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, _) = send(
        &app,
        "POST",
        "/v1/signup",
        None,
        Some(json!({
            "name": "R2-D2",
            "email": generate_unique_email(),
            "password": TEST_PASSWORD
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(users, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_email_pays_the_same_verification(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let credential = create_test_credential(&pool, Role::User, None).await;

    let attempt = |email: String| {
        let app = app.clone();
        async move {
            let start = Instant::now();
            let (status, body) = send(
                &app,
                "POST",
                "/v1/login",
                None,
                Some(json!({ "email": email, "password": "wrong-pass" })),
            )
            .await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            (start.elapsed(), body)
        }
    };

    // First calls warm up the fixed hash and the connection pool.
    attempt(generate_unique_email()).await;
    attempt(credential.email.clone()).await;

    let (unknown, unknown_body) = attempt(generate_unique_email()).await;
    let (wrong, wrong_body) = attempt(credential.email.clone()).await;

    assert_eq!(unknown_body, wrong_body);
    assert!(
        unknown * 2 >= wrong,
        "unknown email took {:?}, wrong password took {:?}",
        unknown,
        wrong
    );
    assert!(unknown >= StdDuration::from_millis(5));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_revoke_is_idempotent(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let (_, token) = login_as(&app, &pool, Role::User).await;
    let session_id = SessionId::from(verify_token(&token, &test_jwt_config()).unwrap().session_id);

    SessionService::revoke(&pool, session_id).await.unwrap();
    let first = session_archived_at(&pool, session_id).await;
    assert!(first.is_some());

    SessionService::revoke(&pool, session_id).await.unwrap();
    assert_eq!(session_archived_at(&pool, session_id).await, first);

    // An id that was never issued is also a no-op.
    SessionService::revoke(&pool, SessionId::new()).await.unwrap();

    let (status, _) = send(&app, "GET", "/v1/info", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_for_unknown_session_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let (credential, token) = login_as(&app, &pool, Role::Admin).await;

    let expired = create_token_with_ttl(
        credential.id.into_inner(),
        Role::Admin,
        verify_token(&token, &test_jwt_config()).unwrap().session_id,
        Duration::seconds(-30),
        &test_jwt_config(),
    )
    .unwrap();

    // Correctly signed, right user, but no such session was ever created.
    let orphan = create_token_with_ttl(
        credential.id.into_inner(),
        Role::Admin,
        Uuid::new_v4(),
        Duration::hours(1),
        &test_jwt_config(),
    )
    .unwrap();

    let (_, expired_body) = send(&app, "GET", "/v1/admin/get-users", Some(&expired), None).await;
    let (status, body) = send(&app, "GET", "/v1/admin/get-users", Some(&orphan), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, expired_body);
    assert_eq!(body["error"], "Invalid or expired token");
}
