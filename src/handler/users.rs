use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{
    db::{reviewdb::ReviewExt, userdb::UserExt},
    dtos::userdtos::{PublicUserDto, UpdateProfileDto},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/profile", get(get_my_profile).put(update_my_profile))
        .route("/:id", get(get_user))
}

pub async fn get_my_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let profile = app_state
        .db_client
        .get_profile(auth.user.id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Profile not found"))?;

    Ok(Json(profile))
}

pub async fn update_my_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    let profile = app_state
        .db_client
        .update_profile(auth.user.id, body)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(profile))
}

/// Public view of a user: name, role, profile and received reviews. The
/// email and verification fields stay private.
pub async fn get_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user(Some(user_id), None, None)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    let profile = app_state
        .db_client
        .get_profile(user.id)
        .await
        .map_err(HttpError::from_db_error)?;

    let reviews_received = app_state
        .db_client
        .get_reviews_for_user(user.id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(PublicUserDto {
        id: user.id,
        name: user.name,
        role: user.role,
        created_at: user.created_at,
        profile,
        reviews_received,
    }))
}
