use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{jobdb::JobExt, reviewdb::ReviewExt},
    dtos::reviewdtos::CreateReviewDto,
    error::{ErrorMessage, HttpError},
    middleware::JWTAuthMiddeware,
    service::access::job_access,
    AppState,
};

pub fn reviews_handler() -> Router {
    Router::new()
        .route("/", post(create_review))
        .route("/user/:user_id", get(get_reviews_for_user))
}

pub async fn create_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    let job_id = body.job_id.unwrap();
    let to_user_id = body.to_user_id.unwrap();
    let rating = body.rating.unwrap();

    let job = app_state
        .db_client
        .get_job(job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    if !job_access(&auth.user, &job).is_participant() {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let existing = app_state
        .db_client
        .get_review_by_triple(job_id, auth.user.id, to_user_id)
        .await
        .map_err(HttpError::from_db_error)?;

    if existing.is_some() {
        return Err(HttpError::conflict(
            "You have already reviewed this user for this job",
        ));
    }

    let review = app_state
        .db_client
        .save_review(
            job_id,
            auth.user.id,
            to_user_id,
            rating,
            body.comment.as_deref(),
        )
        .await
        .map_err(HttpError::from_db_error)?;

    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn get_reviews_for_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .db_client
        .get_reviews_for_user(user_id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(reviews))
}
