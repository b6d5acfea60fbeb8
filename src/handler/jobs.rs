use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{jobdb::JobExt, reviewdb::ReviewExt},
    dtos::jobdtos::{
        CompleteJobDto, CreateJobDto, JobListQueryDto, SelectFreelancerDto, UpdateJobDto,
    },
    error::{ErrorMessage, HttpError},
    middleware::{check_role, check_verified_email, JWTAuthMiddeware},
    models::usermodel::UserRole,
    service::access::job_access,
    AppState,
};

/// Routes that require a token. The public job listing is wired
/// separately in the route table.
pub fn jobs_handler() -> Router {
    Router::new()
        .route("/", post(create_job))
        .route("/:id", get(get_job).put(update_job))
        .route("/:id/select-freelancer", put(select_freelancer))
        .route("/:id/complete", put(complete_job))
}

pub async fn create_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    check_role(&auth.user, &[UserRole::BusinessOwner])?;
    check_verified_email(&app_state, auth.user.id).await?;

    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let job = app_state
        .db_client
        .save_job(
            auth.user.id,
            body.title.as_deref().unwrap(),
            body.description.as_deref().unwrap(),
            body.category.as_deref().unwrap(),
            body.budget_min.unwrap(),
            body.budget_max.unwrap(),
            body.deadline.unwrap(),
        )
        .await
        .map_err(HttpError::from_db_error)?;

    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn list_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<JobListQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .db_client
        .list_jobs(query.owner, query.status, query.category.as_deref())
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(jobs))
}

pub async fn get_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .db_client
        .get_job_detail(job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    Ok(Json(job))
}

pub async fn update_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<UpdateJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let job = app_state
        .db_client
        .get_job(job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    if !job_access(&auth.user, &job).is_owner_or_admin() {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let updated = app_state
        .db_client
        .update_job(job_id, body)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(updated))
}

pub async fn select_freelancer(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<SelectFreelancerDto>,
) -> Result<impl IntoResponse, HttpError> {
    check_role(&auth.user, &[UserRole::BusinessOwner])?;

    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    let freelancer_id = body.freelancer_id.unwrap();

    let job = app_state
        .db_client
        .get_job(job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    // Selecting is the owner's call alone, not an admin's.
    if job.owner_id != auth.user.id {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let updated = app_state
        .db_client
        .select_freelancer(job_id, freelancer_id)
        .await
        .map_err(|e| match e {
            // The chosen freelancer never bid on this job.
            sqlx::Error::RowNotFound => {
                HttpError::bad_request("Freelancer has no proposal on this job")
            }
            other => HttpError::from_db_error(other),
        })?;

    Ok(Json(updated))
}

pub async fn complete_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<CompleteJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

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

    let updated = app_state
        .db_client
        .complete_job(job_id)
        .await
        .map_err(HttpError::from_db_error)?;

    // An inline rating reviews the other side of the engagement. A
    // duplicate (job, from, to) triple is skipped quietly so completing
    // twice stays idempotent.
    if let Some(rating) = body.rating {
        let to_user_id = if auth.user.id == job.owner_id {
            job.chosen_freelancer_id
        } else {
            Some(job.owner_id)
        };

        if let Some(to_user_id) = to_user_id {
            let existing = app_state
                .db_client
                .get_review_by_triple(job_id, auth.user.id, to_user_id)
                .await
                .map_err(HttpError::from_db_error)?;

            if existing.is_none() {
                app_state
                    .db_client
                    .save_review(job_id, auth.user.id, to_user_id, rating, body.comment.as_deref())
                    .await
                    .map_err(HttpError::from_db_error)?;
            }
        }
    }

    Ok(Json(updated))
}
