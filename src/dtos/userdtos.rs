use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    reviewmodel::ReviewWithAuthor,
    usermodel::{Profile, User, UserRole},
};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(required(message = "Name is required"), length(min = 1, message = "Name is required"))]
    pub name: Option<String>,

    #[validate(
        required(message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Password is required"),
        length(min = 6, max = 64, message = "Password must be between 6 and 64 characters")
    )]
    pub password: Option<String>,

    // Validated against the signup role set in the handler so an unknown
    // value yields a 400 rather than a deserialization failure.
    #[validate(required(message = "Role is required"))]
    pub role: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(
        required(message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Password is required"),
        length(min = 1, message = "Password is required")
    )]
    pub password: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct ResendVerificationEmailDto {
    #[validate(
        required(message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateProfileDto {
    pub business_name: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub niche: Option<String>,
    pub skills: Option<String>,
    pub bio: Option<String>,
}

/// User as exposed over the wire: never the password hash or the
/// verification token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FilterUserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub active: bool,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            active: user.active,
            email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserLoginResponseDto {
    pub user: FilterUserDto,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponseDto {
    #[serde(flatten)]
    pub user: FilterUserDto,
    pub profile: Option<Profile>,
}

/// Public view of a user: name, role and received reviews, no email.
#[derive(Debug, Serialize)]
pub struct PublicUserDto {
    pub id: Uuid,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub profile: Option<Profile>,
    pub reviews_received: Vec<ReviewWithAuthor>,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_requires_all_fields() {
        let dto = RegisterUserDto {
            name: Some("Ada".into()),
            email: Some("ada@test.dev".into()),
            password: None,
            role: Some("FREELANCER".into()),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn register_rejects_malformed_email() {
        let dto = RegisterUserDto {
            name: Some("Ada".into()),
            email: Some("not-an-email".into()),
            password: Some("secret123".into()),
            role: Some("FREELANCER".into()),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn register_rejects_short_password() {
        let dto = RegisterUserDto {
            name: Some("Ada".into()),
            email: Some("ada@test.dev".into()),
            password: Some("short".into()),
            role: Some("FREELANCER".into()),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn filter_user_drops_secrets() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: "ada@test.dev".into(),
            password_hash: "$argon2id$...".into(),
            role: UserRole::Freelancer,
            active: true,
            email_verified: false,
            verification_token: Some("tok".into()),
            token_expires_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let filtered = FilterUserDto::filter_user(&user);
        let json = serde_json::to_string(&filtered).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("\"tok\""));
    }
}
