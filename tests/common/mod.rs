//! Shared helpers for the integration tests.
//!
//! Tests run against the database named by `DATABASE_URL`. Each test uses
//! uuid-suffixed email addresses so tests can run concurrently, and cleans up
//! its own users and tasks.

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use dotenv::dotenv;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use taskmaster::auth::verify_token;
use taskmaster::config::Config;
use taskmaster::db;

/// Connects, applies the schema and returns the pool plus config.
/// `JWT_SECRET` gets a test default so only `DATABASE_URL` is mandatory.
pub async fn test_context() -> (PgPool, Config) {
    dotenv().ok();
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "taskmaster-integration-test-secret");
    }
    let config = Config::from_env();
    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to connect to test DB");
    db::bootstrap_schema(&pool)
        .await
        .expect("Failed to apply schema");
    (pool, config)
}

/// A unique email for this test run.
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4())
}

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

/// Signs up a fresh user through the API and returns their id and token.
pub async fn signup_user<S, B>(app: &S, config: &Config, email: &str, password: &str) -> TestUser
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201, "signup failed for {}", email);

    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["token"]
        .as_str()
        .expect("signup response missing token")
        .to_string();
    let claims = verify_token(&token, &config.jwt_secret).expect("signup token invalid");

    TestUser {
        id: claims.sub,
        email: email.to_string(),
        token,
    }
}

/// Creates a task through the API and returns the response envelope.
pub async fn create_task<S, B>(app: &S, token: &str, payload: Value) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/users/tasks")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(payload)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201, "task creation failed");
    test::read_body_json(resp).await
}

/// Removes a user and their tasks directly from the database.
pub async fn cleanup_user(pool: &PgPool, email: &str) {
    if let Ok(Some(user_id)) =
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
    {
        let _ = sqlx::query("DELETE FROM tasks WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await;
        let _ = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(pool)
            .await;
    }
}
