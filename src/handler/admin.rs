use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{
    db::{jobdb::JobExt, userdb::UserExt},
    error::HttpError,
    middleware::{check_role, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

pub fn admin_handler() -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/jobs", get(list_jobs))
        .route("/users/:id/deactivate", put(deactivate_user))
}

pub async fn list_users(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    check_role(&auth.user, &[UserRole::Admin])?;

    let users = app_state
        .db_client
        .get_users_with_counts()
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(users))
}

pub async fn list_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    check_role(&auth.user, &[UserRole::Admin])?;

    let jobs = app_state
        .db_client
        .get_all_jobs_admin()
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(jobs))
}

/// Deactivation is soft; the user's jobs and proposals stay in place, but
/// any further authenticated request by them fails at the token check.
pub async fn deactivate_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    check_role(&auth.user, &[UserRole::Admin])?;

    let user = app_state
        .db_client
        .deactivate_user(user_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("User not found"),
            other => HttpError::from_db_error(other),
        })?;

    Ok(Json(crate::dtos::userdtos::FilterUserDto::filter_user(
        &user,
    )))
}
