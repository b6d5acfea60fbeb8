use std::sync::Arc;

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::IntoResponse,
    Extension,
};

use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    db::userdb::UserExt,
    error::{ErrorMessage, HttpError},
    models::usermodel::{User, UserRole},
    utils::token,
    AppState,
};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JWTAuthMiddeware {
    pub user: User,
}

/// Bearer-token middleware: decodes the token, re-reads the user so role and
/// active status are current, and attaches it to the request.
pub async fn auth(
    cookie_jar: CookieJar,
    Extension(app_state): Extension<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| {
                    auth_value
                        .strip_prefix("Bearer ")
                        .map(|token| token.to_owned())
                })
        })
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::TokenNotProvided.to_string()))?;

    let claims = token::decode_token(&token, app_state.env.jwt_secret.as_bytes())
        .map_err(|_| HttpError::unauthorized(ErrorMessage::InvalidToken.to_string()))?;

    let user_id = uuid::Uuid::parse_str(&claims.sub)
        .map_err(|_| HttpError::unauthorized(ErrorMessage::InvalidToken.to_string()))?;

    let user = app_state
        .db_client
        .get_user(Some(user_id), None, None)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::UserNoLongerExist.to_string()))?;

    if !user.active {
        return Err(HttpError::forbidden(
            ErrorMessage::AccountDeactivated.to_string(),
        ));
    }

    req.extensions_mut().insert(JWTAuthMiddeware { user });

    Ok(next.run(req).await)
}

/// Pure role gate over the attached identity.
pub fn check_role(user: &User, required_roles: &[UserRole]) -> Result<(), HttpError> {
    if !required_roles.contains(&user.role) {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }
    Ok(())
}

/// Email verification gate. Looks the flag up fresh rather than trusting a
/// claim minted before the user verified.
pub async fn check_verified_email(app_state: &AppState, user_id: uuid::Uuid) -> Result<(), HttpError> {
    let user = app_state
        .db_client
        .get_user(Some(user_id), None, None)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::UserNoLongerExist.to_string()))?;

    if !user.email_verified {
        return Err(HttpError::forbidden(
            ErrorMessage::EmailNotVerified.to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            name: "n".into(),
            email: "e@test.dev".into(),
            password_hash: "h".into(),
            role,
            active: true,
            email_verified: true,
            verification_token: None,
            token_expires_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn role_gate_allows_listed_roles() {
        let owner = user(UserRole::BusinessOwner);
        assert!(check_role(&owner, &[UserRole::BusinessOwner]).is_ok());
        assert!(check_role(&owner, &[UserRole::BusinessOwner, UserRole::Admin]).is_ok());
    }

    #[test]
    fn role_gate_rejects_everyone_else() {
        let freelancer = user(UserRole::Freelancer);
        let err = check_role(&freelancer, &[UserRole::Admin]).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
    }
}
