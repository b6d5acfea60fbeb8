// db/jobdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;

use crate::dtos::jobdtos::UpdateJobDto;
use crate::models::jobmodel::{Job, JobDetail, JobStatus, JobWithCounts};
use crate::models::proposalmodel::ProposalStatus;

const JOB_COLUMNS: &str = r#"
    id, owner_id, title, description, category, budget_min, budget_max,
    deadline, status, chosen_freelancer_id, created_at, updated_at
"#;

#[async_trait]
pub trait JobExt {
    async fn save_job(
        &self,
        owner_id: Uuid,
        title: &str,
        description: &str,
        category: &str,
        budget_min: f64,
        budget_max: f64,
        deadline: DateTime<Utc>,
    ) -> Result<Job, sqlx::Error>;

    async fn get_job(&self, job_id: Uuid) -> Result<Option<Job>, sqlx::Error>;

    async fn get_job_detail(&self, job_id: Uuid) -> Result<Option<JobDetail>, sqlx::Error>;

    async fn list_jobs(
        &self,
        owner: Option<Uuid>,
        status: Option<JobStatus>,
        category: Option<&str>,
    ) -> Result<Vec<JobWithCounts>, sqlx::Error>;

    async fn update_job(&self, job_id: Uuid, fields: UpdateJobDto) -> Result<Job, sqlx::Error>;

    /// The one multi-row transaction in the system: mark the job in progress
    /// with the chosen freelancer, accept that freelancer's proposal and
    /// reject every rival, all visible together or not at all.
    async fn select_freelancer(
        &self,
        job_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<Job, sqlx::Error>;

    async fn complete_job(&self, job_id: Uuid) -> Result<Job, sqlx::Error>;

    async fn get_all_jobs_admin(&self) -> Result<Vec<JobDetail>, sqlx::Error>;
}

#[async_trait]
impl JobExt for DBClient {
    async fn save_job(
        &self,
        owner_id: Uuid,
        title: &str,
        description: &str,
        category: &str,
        budget_min: f64,
        budget_max: f64,
        deadline: DateTime<Utc>,
    ) -> Result<Job, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (owner_id, title, description, category, budget_min, budget_max, deadline)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(budget_min)
        .bind(budget_max)
        .bind(deadline)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Option<Job>, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_job_detail(&self, job_id: Uuid) -> Result<Option<JobDetail>, sqlx::Error> {
        sqlx::query_as::<_, JobDetail>(
            r#"
            SELECT j.id, j.owner_id, o.name AS owner_name, o.email AS owner_email,
                   j.title, j.description, j.category, j.budget_min, j.budget_max,
                   j.deadline, j.status, j.chosen_freelancer_id, f.name AS chosen_freelancer_name,
                   (SELECT COUNT(*) FROM proposals p WHERE p.job_id = j.id) AS proposal_count,
                   (SELECT COUNT(*) FROM messages m WHERE m.job_id = j.id) AS message_count,
                   j.created_at, j.updated_at
            FROM jobs j
            JOIN users o ON o.id = j.owner_id
            LEFT JOIN users f ON f.id = j.chosen_freelancer_id
            WHERE j.id = $1
            "#,
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_jobs(
        &self,
        owner: Option<Uuid>,
        status: Option<JobStatus>,
        category: Option<&str>,
    ) -> Result<Vec<JobWithCounts>, sqlx::Error> {
        sqlx::query_as::<_, JobWithCounts>(
            r#"
            SELECT j.id, j.owner_id, o.name AS owner_name, j.title, j.description,
                   j.category, j.budget_min, j.budget_max, j.deadline, j.status,
                   j.chosen_freelancer_id,
                   (SELECT COUNT(*) FROM proposals p WHERE p.job_id = j.id) AS proposal_count,
                   j.created_at
            FROM jobs j
            JOIN users o ON o.id = j.owner_id
            WHERE ($1::uuid IS NULL OR j.owner_id = $1)
              AND ($2::job_status IS NULL OR j.status = $2)
              AND ($3::text IS NULL OR j.category = $3)
            ORDER BY j.created_at DESC
            "#,
        )
        .bind(owner)
        .bind(status)
        .bind(category)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_job(&self, job_id: Uuid, fields: UpdateJobDto) -> Result<Job, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                budget_min = COALESCE($5, budget_min),
                budget_max = COALESCE($6, budget_max),
                deadline = COALESCE($7, deadline),
                status = COALESCE($8, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(job_id)
        .bind(fields.title)
        .bind(fields.description)
        .bind(fields.category)
        .bind(fields.budget_min)
        .bind(fields.budget_max)
        .bind(fields.deadline)
        .bind(fields.status)
        .fetch_one(&self.pool)
        .await
    }

    async fn select_freelancer(
        &self,
        job_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<Job, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        // Lock the job row so concurrent selections serialize here.
        sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1 FOR UPDATE"
        ))
        .bind(job_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

        // The chosen freelancer must actually have bid on this job.
        let accepted = sqlx::query(
            r#"
            UPDATE proposals
            SET status = $3
            WHERE job_id = $1 AND freelancer_id = $2
            "#,
        )
        .bind(job_id)
        .bind(freelancer_id)
        .bind(ProposalStatus::Accepted)
        .execute(&mut *tx)
        .await?;

        if accepted.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        sqlx::query(
            r#"
            UPDATE proposals
            SET status = $3
            WHERE job_id = $1 AND freelancer_id <> $2
            "#,
        )
        .bind(job_id)
        .bind(freelancer_id)
        .bind(ProposalStatus::Rejected)
        .execute(&mut *tx)
        .await?;

        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET chosen_freelancer_id = $2, status = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(job_id)
        .bind(freelancer_id)
        .bind(JobStatus::InProgress)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(job)
    }

    async fn complete_job(&self, job_id: Uuid) -> Result<Job, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(job_id)
        .bind(JobStatus::Completed)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_all_jobs_admin(&self) -> Result<Vec<JobDetail>, sqlx::Error> {
        sqlx::query_as::<_, JobDetail>(
            r#"
            SELECT j.id, j.owner_id, o.name AS owner_name, o.email AS owner_email,
                   j.title, j.description, j.category, j.budget_min, j.budget_max,
                   j.deadline, j.status, j.chosen_freelancer_id, f.name AS chosen_freelancer_name,
                   (SELECT COUNT(*) FROM proposals p WHERE p.job_id = j.id) AS proposal_count,
                   (SELECT COUNT(*) FROM messages m WHERE m.job_id = j.id) AS message_count,
                   j.created_at, j.updated_at
            FROM jobs j
            JOIN users o ON o.id = j.owner_id
            LEFT JOIN users f ON f.id = j.chosen_freelancer_id
            ORDER BY j.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
