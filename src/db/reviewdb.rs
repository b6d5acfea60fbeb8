// db/reviewdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::reviewmodel::{Review, ReviewWithAuthor};

#[async_trait]
pub trait ReviewExt {
    async fn save_review(
        &self,
        job_id: Uuid,
        from_user_id: Uuid,
        to_user_id: Uuid,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<Review, sqlx::Error>;

    async fn get_review_by_triple(
        &self,
        job_id: Uuid,
        from_user_id: Uuid,
        to_user_id: Uuid,
    ) -> Result<Option<Review>, sqlx::Error>;

    /// Reviews received by a user, newest first.
    async fn get_reviews_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ReviewWithAuthor>, sqlx::Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn save_review(
        &self,
        job_id: Uuid,
        from_user_id: Uuid,
        to_user_id: Uuid,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<Review, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (job_id, from_user_id, to_user_id, rating, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, job_id, from_user_id, to_user_id, rating, comment, created_at
            "#,
        )
        .bind(job_id)
        .bind(from_user_id)
        .bind(to_user_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_review_by_triple(
        &self,
        job_id: Uuid,
        from_user_id: Uuid,
        to_user_id: Uuid,
    ) -> Result<Option<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id, job_id, from_user_id, to_user_id, rating, comment, created_at
            FROM reviews
            WHERE job_id = $1 AND from_user_id = $2 AND to_user_id = $3
            "#,
        )
        .bind(job_id)
        .bind(from_user_id)
        .bind(to_user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_reviews_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ReviewWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, ReviewWithAuthor>(
            r#"
            SELECT r.id, r.job_id, j.title AS job_title,
                   r.from_user_id, u.name AS from_user_name,
                   r.to_user_id, r.rating, r.comment, r.created_at
            FROM reviews r
            JOIN jobs j ON j.id = r.job_id
            JOIN users u ON u.id = r.from_user_id
            WHERE r.to_user_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
