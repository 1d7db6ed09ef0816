pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};

pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

/// Payload for `POST /api/auth/signup`.
///
/// Fields are optional at the type level so the validator can report missing
/// ones by name instead of surfacing a deserialization error.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    /// Optional display name; defaults to the email local part.
    pub name: Option<String>,
}

/// Payload for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// `data` portion of the signup/login response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenData {
    pub token: String,
}
