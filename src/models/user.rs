use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Placeholder avatar assigned to every new account.
pub const DEFAULT_AVATAR: &str = "https://via.placeholder.com/150/6366f1/ffffff?text=U";

/// A user account as stored in the database and returned by the API.
///
/// The password hash is never serialized; every representation of a user that
/// leaves the server excludes it.
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub bio: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Builds a new account record from normalized signup data.
    ///
    /// `name` falls back to the local part of the email when not supplied.
    pub fn new(email: String, password_hash: String, name: Option<String>) -> Self {
        let name = name.unwrap_or_else(|| local_part(&email).to_string());
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name,
            bio: String::new(),
            avatar: DEFAULT_AVATAR.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Lowercases and trims an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// The part of an email address before the `@`.
pub fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Payload for `PUT /api/users/profile`. Both fields optional; omitted fields
/// keep their stored values.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
}

/// Payload for `PUT /api/users/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(rename = "currentPassword")]
    pub current_password: Option<String>,
    #[serde(rename = "newPassword")]
    pub new_password: Option<String>,
}
