use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{jobdb::JobExt, proposaldb::ProposalExt},
    dtos::proposaldtos::{CreateProposalDto, UpdateProposalStatusDto},
    error::{is_unique_violation, ErrorMessage, HttpError},
    middleware::{check_role, JWTAuthMiddeware},
    models::{jobmodel::JobStatus, proposalmodel::ProposalStatus, usermodel::UserRole},
    service::access::job_access,
    AppState,
};

pub fn proposals_handler() -> Router {
    Router::new()
        .route("/", post(create_proposal))
        .route("/job/:job_id", get(get_proposals_for_job))
        .route("/my-proposals", get(my_proposals))
        .route("/:id", put(update_proposal_status))
}

pub async fn create_proposal(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateProposalDto>,
) -> Result<impl IntoResponse, HttpError> {
    check_role(&auth.user, &[UserRole::Freelancer])?;

    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    let job_id = body.job_id.unwrap();

    let job = app_state
        .db_client
        .get_job(job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    if job.status != JobStatus::Open {
        return Err(HttpError::bad_request("Job is not accepting proposals"));
    }

    let proposal = app_state
        .db_client
        .save_proposal(
            job_id,
            auth.user.id,
            body.message.as_deref().unwrap(),
            body.proposed_price.unwrap(),
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                HttpError::conflict("You have already submitted a proposal for this job")
            } else {
                HttpError::from_db_error(e)
            }
        })?;

    Ok((StatusCode::CREATED, Json(proposal)))
}

pub async fn get_proposals_for_job(
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

    if !job_access(&auth.user, &job).is_owner_or_admin() {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let proposals = app_state
        .db_client
        .get_proposals_for_job(job_id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(proposals))
}

pub async fn my_proposals(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    check_role(&auth.user, &[UserRole::Freelancer])?;

    let proposals = app_state
        .db_client
        .get_proposals_for_freelancer(auth.user.id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(proposals))
}

/// Direct status edits are limited to rejecting a pending proposal.
/// Acceptance only ever happens through select-freelancer, and a decided
/// proposal is never re-opened.
fn is_allowed_transition(current: ProposalStatus, requested: ProposalStatus) -> bool {
    current == ProposalStatus::Pending && requested == ProposalStatus::Rejected
}

pub async fn update_proposal_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(proposal_id): Path<Uuid>,
    Json(body): Json<UpdateProposalStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    let status = body.status.unwrap();

    let proposal = app_state
        .db_client
        .get_proposal(proposal_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Proposal not found"))?;

    let job = app_state
        .db_client
        .get_job(proposal.job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    if !job_access(&auth.user, &job).is_owner_or_admin() {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    if !is_allowed_transition(proposal.status, status) {
        return Err(HttpError::bad_request(
            "Only a pending proposal can be rejected",
        ));
    }

    let updated = app_state
        .db_client
        .update_proposal_status(proposal_id, status)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_to_rejected_is_allowed() {
        use ProposalStatus::*;

        assert!(is_allowed_transition(Pending, Rejected));

        assert!(!is_allowed_transition(Pending, Accepted));
        assert!(!is_allowed_transition(Pending, Pending));
        assert!(!is_allowed_transition(Accepted, Rejected));
        assert!(!is_allowed_transition(Accepted, Pending));
        assert!(!is_allowed_transition(Rejected, Pending));
        assert!(!is_allowed_transition(Rejected, Accepted));
    }
}
