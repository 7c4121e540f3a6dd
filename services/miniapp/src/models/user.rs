//! User entity and seller accounting projections

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Client,
    Seller,
    Moderator,
    Admin,
}

impl UserRole {
    /// Whether the role grants access to the moderator namespace
    pub fn can_moderate(&self) -> bool {
        matches!(self, UserRole::Moderator | UserRole::Admin)
    }

    /// Wire value used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Client => "client",
            UserRole::Seller => "seller",
            UserRole::Moderator => "moderator",
            UserRole::Admin => "admin",
        }
    }
}

/// An account as returned by `/users/me` and the moderator user list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub telegram_id: Option<i64>,
    #[serde(default)]
    pub nickname: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub is_banned: bool,
    #[serde(default)]
    pub is_seller: bool,
    /// Seller listing-quota balance
    #[serde(default)]
    pub balance: i64,
    #[serde(default)]
    pub referrer_bonus: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Derived seller accounting figures, computed server-side
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SellerBalance {
    #[serde(default)]
    pub balance: i64,
    #[serde(default)]
    pub free_balance: f64,
    #[serde(default)]
    pub reserved_active: f64,
    #[serde(default)]
    pub unpaid_plan: f64,
    #[serde(default)]
    pub in_progress: f64,
}

/// A blacklist record for a seller nickname
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistEntry {
    pub nickname: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_gate_the_moderator_namespace() {
        assert!(UserRole::Admin.can_moderate());
        assert!(UserRole::Moderator.can_moderate());
        assert!(!UserRole::Seller.can_moderate());
        assert!(!UserRole::User.can_moderate());
    }

    #[test]
    fn user_parses_with_defaults() {
        let json = r#"{
            "id": "6f2e9d1c-8a3b-4f5e-9c7d-1a2b3c4d5e6f",
            "role": "seller",
            "created_at": "2024-01-01T10:00:00",
            "updated_at": "2024-01-01T10:00:00"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, UserRole::Seller);
        assert!(!user.is_banned);
        assert_eq!(user.balance, 0);
    }
}
