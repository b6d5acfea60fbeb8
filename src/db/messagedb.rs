// db/messagedb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::messagemodel::MessageWithSender;

#[async_trait]
pub trait MessageExt {
    async fn save_message(
        &self,
        job_id: Uuid,
        sender_id: Uuid,
        text: &str,
    ) -> Result<MessageWithSender, sqlx::Error>;

    /// Conversation history for a job, oldest first.
    async fn get_messages_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<MessageWithSender>, sqlx::Error>;
}

#[async_trait]
impl MessageExt for DBClient {
    async fn save_message(
        &self,
        job_id: Uuid,
        sender_id: Uuid,
        text: &str,
    ) -> Result<MessageWithSender, sqlx::Error> {
        sqlx::query_as::<_, MessageWithSender>(
            r#"
            WITH inserted AS (
                INSERT INTO messages (job_id, sender_id, text)
                VALUES ($1, $2, $3)
                RETURNING id, job_id, sender_id, text, created_at
            )
            SELECT i.id, i.job_id, i.sender_id, u.name AS sender_name, i.text, i.created_at
            FROM inserted i
            JOIN users u ON u.id = i.sender_id
            "#,
        )
        .bind(job_id)
        .bind(sender_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_messages_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<MessageWithSender>, sqlx::Error> {
        sqlx::query_as::<_, MessageWithSender>(
            r#"
            SELECT m.id, m.job_id, m.sender_id, u.name AS sender_name, m.text, m.created_at
            FROM messages m
            JOIN users u ON u.id = m.sender_id
            WHERE m.job_id = $1
            ORDER BY m.created_at ASC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }
}
