use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::usermodel::UserRole;

/// Bearer token payload: identity plus role so downstream gates can check
/// permissions without an extra lookup. Email verification is always
/// re-checked against the store, never trusted from here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TokenClaims {
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub iat: usize,
    pub exp: usize,
}

pub fn create_token(
    user_id: &Uuid,
    email: &str,
    role: UserRole,
    secret: &[u8],
    expires_in_minutes: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        iat: now.timestamp() as usize,
        exp: (now + Duration::minutes(expires_in_minutes)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
}

pub fn decode_token(token: &str, secret: &[u8]) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let decoded = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )?;
    Ok(decoded.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn create_and_decode_round_trip() {
        let user_id = Uuid::new_v4();
        let token = create_token(&user_id, "owner@test.dev", UserRole::BusinessOwner, SECRET, 60)
            .unwrap();

        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "owner@test.dev");
        assert_eq!(claims.role, UserRole::BusinessOwner);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let user_id = Uuid::new_v4();
        let token =
            create_token(&user_id, "a@b.c", UserRole::Freelancer, SECRET, 60).unwrap();
        assert!(decode_token(&token, b"other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let user_id = Uuid::new_v4();
        // Issued already past expiry
        let token = create_token(&user_id, "a@b.c", UserRole::Freelancer, SECRET, -60).unwrap();
        assert!(decode_token(&token, SECRET).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let user_id = Uuid::new_v4();
        let mut token =
            create_token(&user_id, "a@b.c", UserRole::Freelancer, SECRET, 60).unwrap();
        token.push('x');
        assert!(decode_token(&token, SECRET).is_err());
    }
}
