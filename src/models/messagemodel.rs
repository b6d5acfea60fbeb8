use chrono::prelude::*;
use serde::Serialize;
use uuid::Uuid;

/// Message row joined with the sender's name, the shape every read and
/// write returns.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct MessageWithSender {
    pub id: Uuid,
    pub job_id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
