use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{
    generate_token, hash_password, verify_password, AuthenticatedUserId, LoginRequest,
    SignupRequest, TokenData,
};
use crate::config::Config;
use crate::error::AppError;
use crate::models::{normalize_email, User};
use crate::response::ApiResponse;
use crate::validation::{validate_login, validate_signup};

/// Register a new user
///
/// Stores the account with a normalized email and a bcrypt hash of the
/// password, then returns a fresh access token.
#[post("/signup")]
pub async fn signup(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    payload: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    validate_signup(&payload)?;

    let email = normalize_email(payload.email.as_deref().unwrap_or_default());

    let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&**pool)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("User already exists".into()));
    }

    let password_hash = hash_password(payload.password.as_deref().unwrap_or_default())?;
    let name = payload.name.as_deref().map(|n| n.trim().to_string());
    let user = User::new(email, password_hash, name);

    sqlx::query(
        "INSERT INTO users (id, email, password_hash, name, bio, avatar, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.name)
    .bind(&user.bio)
    .bind(&user.avatar)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(&**pool)
    .await?;

    let token = generate_token(user.id, &config.jwt_secret)?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        "User registered successfully",
        TokenData { token },
    )))
}

/// Authenticate a user and return an access token.
///
/// Unknown email and wrong password produce the same generic 401: the caller
/// never learns which half of the credentials failed.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    validate_login(&payload)?;

    let email = normalize_email(payload.email.as_deref().unwrap_or_default());

    let row = sqlx::query_as::<_, (Uuid, String)>(
        "SELECT id, password_hash FROM users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(&**pool)
    .await?;

    let (user_id, password_hash) = match row {
        Some(row) => row,
        None => return Err(AppError::Unauthorized("Invalid Credentials".into())),
    };

    if !verify_password(payload.password.as_deref().unwrap_or_default(), &password_hash)? {
        return Err(AppError::Unauthorized("Invalid Credentials".into()));
    }

    let token = generate_token(user_id, &config.jwt_secret)?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        "Logged in successfully",
        TokenData { token },
    )))
}

/// Return the authenticated user's own record, password excluded.
#[get("/me")]
pub async fn me(
    pool: web::Data<PgPool>,
    caller: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, name, bio, avatar, created_at, updated_at
         FROM users WHERE id = $1",
    )
    .bind(caller.0)
    .fetch_optional(&**pool)
    .await?;

    match user {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::data(user))),
        None => Err(AppError::NotFound("User not found".into())),
    }
}
