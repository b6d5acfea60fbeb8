use std::sync::Arc;

use axum::{
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use chrono::{Duration, Utc};
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::{
        FilterUserDto, LoginUserDto, MeResponseDto, RegisterUserDto,
        ResendVerificationEmailDto, Response, UserLoginResponseDto,
    },
    error::{ErrorMessage, HttpError},
    mail::mails::{send_verification_email, send_welcome_email},
    middleware::JWTAuthMiddeware,
    models::usermodel::UserRole,
    utils::{password, token, token_generator::generate_verification_token},
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/verify-email/:token", get(verify_email))
        .route("/resend-verification", post(resend_verification))
}

fn parse_signup_role(role: &str) -> Result<UserRole, HttpError> {
    let role = match role {
        "BUSINESS_OWNER" => UserRole::BusinessOwner,
        "FREELANCER" => UserRole::Freelancer,
        _ => return Err(HttpError::bad_request("Invalid role")),
    };
    debug_assert!(role.is_signup_role());
    Ok(role)
}

pub async fn signup(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let name = body.name.unwrap();
    let email = body.email.unwrap();
    let role = parse_signup_role(body.role.as_deref().unwrap())?;

    let existing_user = app_state
        .db_client
        .get_user(None, Some(&email), None)
        .await
        .map_err(HttpError::from_db_error)?;

    if existing_user.is_some() {
        return Err(HttpError::conflict(ErrorMessage::EmailTaken.to_string()));
    }

    let hashed_password =
        password::hash(body.password.unwrap()).map_err(HttpError::server_error)?;

    let verification_token = generate_verification_token();
    let token_expires_at = Utc::now() + Duration::hours(24);

    let user = app_state
        .db_client
        .save_user(
            &name,
            &email,
            &hashed_password,
            role,
            &verification_token,
            token_expires_at,
        )
        .await
        .map_err(HttpError::from_db_error)?;

    // Signup is all-or-nothing with respect to mail delivery: a user who
    // never received a verification link cannot get past the email gate, so
    // roll the row back and report the dependency failure.
    if let Err(e) = send_verification_email(
        &app_state.mailer,
        &user.email,
        &user.name,
        &app_state.env.frontend_url,
        &verification_token,
    )
    .await
    {
        tracing::error!("verification email failed for {}: {}", user.email, e);
        app_state
            .db_client
            .delete_user(user.id)
            .await
            .map_err(HttpError::from_db_error)?;
        return Err(HttpError::bad_gateway(
            "Failed to send verification email. Please try again.",
        ));
    }

    Ok((
        StatusCode::CREATED,
        Json(Response {
            message: "Registration successful! Please check your email to verify your account."
                .to_string(),
        }),
    ))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .db_client
        .get_user(None, body.email.as_deref(), None)
        .await
        .map_err(HttpError::from_db_error)?;

    let user =
        result.ok_or_else(|| HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()))?;

    if !user.active {
        return Err(HttpError::forbidden(
            ErrorMessage::AccountDeactivated.to_string(),
        ));
    }

    let password_matched = password::compare(body.password.as_deref().unwrap(), &user.password_hash)
        .map_err(|_| HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()))?;

    if !password_matched {
        return Err(HttpError::unauthorized(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    let token = token::create_token(
        &user.id,
        &user.email,
        user.role,
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie_duration = time::Duration::minutes(app_state.env.jwt_maxage);
    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error(ErrorMessage::ServerError.to_string()))?,
    );

    let response = Json(UserLoginResponseDto {
        user: FilterUserDto::filter_user(&user),
        token,
    });

    let mut response = response.into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}

pub async fn me(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let profile = app_state
        .db_client
        .get_profile(auth.user.id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(MeResponseDto {
        user: FilterUserDto::filter_user(&auth.user),
        profile,
    }))
}

pub async fn verify_email(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let result = app_state
        .db_client
        .get_user(None, None, Some(&token))
        .await
        .map_err(HttpError::from_db_error)?;

    let user = result.ok_or_else(|| HttpError::bad_request("Invalid verification token"))?;

    // Second click on the same link: report success rather than an error.
    if user.email_verified {
        return Ok(Json(Response {
            message: "Email already verified. You can log in.".to_string(),
        }));
    }

    match user.token_expires_at {
        Some(expires_at) if Utc::now() <= expires_at => {}
        _ => {
            return Err(HttpError::bad_request(
                "Verification token has expired. Please request a new one.",
            ))
        }
    }

    app_state
        .db_client
        .mark_email_verified(user.id)
        .await
        .map_err(HttpError::from_db_error)?;

    // Welcome mail is best-effort; verification already succeeded.
    if let Err(e) = send_welcome_email(
        &app_state.mailer,
        &user.email,
        &user.name,
        &app_state.env.frontend_url,
    )
    .await
    {
        tracing::warn!("welcome email failed for {}: {}", user.email, e);
    }

    Ok(Json(Response {
        message: "Email verified successfully! You can now log in.".to_string(),
    }))
}

pub async fn resend_verification(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<ResendVerificationEmailDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let email = body.email.unwrap();

    // Same response whether or not the account exists, to prevent
    // account enumeration.
    let generic = Response {
        message: "If an account exists for that address, a verification email has been sent."
            .to_string(),
    };

    let user = app_state
        .db_client
        .get_user(None, Some(&email), None)
        .await
        .map_err(HttpError::from_db_error)?;

    if let Some(user) = user {
        if !user.email_verified {
            let verification_token = generate_verification_token();
            let token_expires_at = Utc::now() + Duration::hours(24);

            app_state
                .db_client
                .set_verification_token(user.id, &verification_token, token_expires_at)
                .await
                .map_err(HttpError::from_db_error)?;

            if let Err(e) = send_verification_email(
                &app_state.mailer,
                &user.email,
                &user.name,
                &app_state.env.frontend_url,
                &verification_token,
            )
            .await
            {
                tracing::error!("resend verification email failed for {}: {}", user.email, e);
            }
        }
    }

    Ok(Json(generic))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_roles_are_restricted() {
        assert_eq!(
            parse_signup_role("BUSINESS_OWNER").unwrap(),
            UserRole::BusinessOwner
        );
        assert_eq!(parse_signup_role("FREELANCER").unwrap(), UserRole::Freelancer);
        assert!(parse_signup_role("ADMIN").is_err());
        assert!(parse_signup_role("business_owner").is_err());
        assert!(parse_signup_role("").is_err());
    }
}
