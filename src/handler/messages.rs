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
    db::{jobdb::JobExt, messagedb::MessageExt},
    dtos::messagedtos::SendMessageDto,
    error::{ErrorMessage, HttpError},
    middleware::JWTAuthMiddeware,
    service::access::job_access,
    AppState,
};

pub fn messages_handler() -> Router {
    Router::new()
        .route("/", post(send_message))
        .route("/job/:job_id", get(get_messages_for_job))
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    let job_id = body.job_id.unwrap();

    let job = app_state
        .db_client
        .get_job(job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    if !job_access(&auth.user, &job).is_participant_or_admin() {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let message = app_state
        .db_client
        .save_message(job_id, auth.user.id, body.text.as_deref().unwrap())
        .await
        .map_err(HttpError::from_db_error)?;

    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn get_messages_for_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .db_client
        .get_job(job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    if !job_access(&auth.user, &job).is_participant_or_admin() {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let messages = app_state
        .db_client
        .get_messages_for_job(job_id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(messages))
}
