use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    BusinessOwner,
    Freelancer,
    Admin,
}

impl UserRole {
    /// Roles a user may pick at signup. Admin accounts are seeded, never
    /// self-registered.
    pub fn is_signup_role(&self) -> bool {
        matches!(self, UserRole::BusinessOwner | UserRole::Freelancer)
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub active: bool,
    pub email_verified: bool,
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,
    #[serde(skip_serializing)]
    pub token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Profile {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub business_name: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub niche: Option<String>,
    pub skills: Option<String>,
    pub bio: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// User row with owned-job and proposal counts, for the admin listing.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct UserWithCounts {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub active: bool,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub job_count: i64,
    pub proposal_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_format_is_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&UserRole::BusinessOwner).unwrap(),
            "\"BUSINESS_OWNER\""
        );
        let parsed: UserRole = serde_json::from_str("\"FREELANCER\"").unwrap();
        assert_eq!(parsed, UserRole::Freelancer);
    }

    #[test]
    fn admin_is_not_a_signup_role() {
        assert!(UserRole::BusinessOwner.is_signup_role());
        assert!(UserRole::Freelancer.is_signup_role());
        assert!(!UserRole::Admin.is_signup_role());
    }
}
