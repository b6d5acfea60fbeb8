use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "job_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Job {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub budget_min: f64,
    pub budget_max: f64,
    pub deadline: DateTime<Utc>,
    pub status: JobStatus,
    pub chosen_freelancer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Job row joined with the owner summary and proposal count, as returned by
/// the list endpoints.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct JobWithCounts {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub budget_min: f64,
    pub budget_max: f64,
    pub deadline: DateTime<Utc>,
    pub status: JobStatus,
    pub chosen_freelancer_id: Option<Uuid>,
    pub proposal_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct JobDetail {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub owner_email: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub budget_min: f64,
    pub budget_max: f64,
    pub deadline: DateTime<Utc>,
    pub status: JobStatus,
    pub chosen_freelancer_id: Option<Uuid>,
    pub chosen_freelancer_name: Option<String>,
    pub proposal_count: i64,
    pub message_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
