//! User accounts and sessions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::hotel::Hotel;
use crate::impl_domain_status_conversions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Manager,
    #[default]
    Staff,
    Technicien,
}

impl_domain_status_conversions!(Role {
    Manager => "MANAGER",
    Staff => "STAFF",
    Technicien => "TECHNICIEN",
});

/// Stored user. `password_hash` never leaves the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub role: Role,
    pub specialite: Option<String>,
    pub hotel_id: i64,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Name shown in messages, falling back to the email.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|name| !name.is_empty()).unwrap_or(&self.email)
    }

    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }

    pub fn is_technician(&self) -> bool {
        self.role == Role::Technicien
    }
}

/// Insert payload for the user repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub role: Role,
    pub specialite: Option<String>,
    pub hotel_id: i64,
}

/// Registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hotel_id: i64,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub specialite: Option<String>,
}

/// Login form; users are scoped to the hotel they pick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub hotel_id: i64,
}

/// Authenticated user as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub specialite: Option<String>,
    pub hotel_id: i64,
    pub hotel: Hotel,
}

impl UserSession {
    pub fn new(user: &User, hotel: Hotel) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            specialite: user.specialite.clone(),
            hotel_id: user.hotel_id,
            hotel,
        }
    }
}
