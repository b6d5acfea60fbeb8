use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::jobmodel::JobStatus;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "proposal_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Proposal {
    pub id: Uuid,
    pub job_id: Uuid,
    pub freelancer_id: Uuid,
    pub message: String,
    pub proposed_price: f64,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
}

/// Proposal joined with the freelancer's public profile, for the job owner's
/// review screen.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct ProposalWithFreelancer {
    pub id: Uuid,
    pub job_id: Uuid,
    pub freelancer_id: Uuid,
    pub freelancer_name: String,
    pub niche: Option<String>,
    pub skills: Option<String>,
    pub bio: Option<String>,
    pub message: String,
    pub proposed_price: f64,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
}

/// Proposal joined with a job summary, for the freelancer's own list.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct ProposalWithJob {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub job_description: String,
    pub budget_min: f64,
    pub budget_max: f64,
    pub job_status: JobStatus,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub message: String,
    pub proposed_price: f64,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
}
