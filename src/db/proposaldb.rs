// db/proposaldb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::proposalmodel::{
    Proposal, ProposalStatus, ProposalWithFreelancer, ProposalWithJob,
};

const PROPOSAL_COLUMNS: &str =
    "id, job_id, freelancer_id, message, proposed_price, status, created_at";

#[async_trait]
pub trait ProposalExt {
    /// Insert a proposal. A second bid by the same freelancer on the same job
    /// trips the unique index and surfaces as a conflict.
    async fn save_proposal(
        &self,
        job_id: Uuid,
        freelancer_id: Uuid,
        message: &str,
        proposed_price: f64,
    ) -> Result<Proposal, sqlx::Error>;

    async fn get_proposal(&self, proposal_id: Uuid) -> Result<Option<Proposal>, sqlx::Error>;

    async fn get_proposals_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<ProposalWithFreelancer>, sqlx::Error>;

    async fn get_proposals_for_freelancer(
        &self,
        freelancer_id: Uuid,
    ) -> Result<Vec<ProposalWithJob>, sqlx::Error>;

    async fn update_proposal_status(
        &self,
        proposal_id: Uuid,
        status: ProposalStatus,
    ) -> Result<Proposal, sqlx::Error>;
}

#[async_trait]
impl ProposalExt for DBClient {
    async fn save_proposal(
        &self,
        job_id: Uuid,
        freelancer_id: Uuid,
        message: &str,
        proposed_price: f64,
    ) -> Result<Proposal, sqlx::Error> {
        sqlx::query_as::<_, Proposal>(&format!(
            r#"
            INSERT INTO proposals (job_id, freelancer_id, message, proposed_price)
            VALUES ($1, $2, $3, $4)
            RETURNING {PROPOSAL_COLUMNS}
            "#
        ))
        .bind(job_id)
        .bind(freelancer_id)
        .bind(message)
        .bind(proposed_price)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_proposal(&self, proposal_id: Uuid) -> Result<Option<Proposal>, sqlx::Error> {
        sqlx::query_as::<_, Proposal>(&format!(
            "SELECT {PROPOSAL_COLUMNS} FROM proposals WHERE id = $1"
        ))
        .bind(proposal_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_proposals_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<ProposalWithFreelancer>, sqlx::Error> {
        sqlx::query_as::<_, ProposalWithFreelancer>(
            r#"
            SELECT p.id, p.job_id, p.freelancer_id, u.name AS freelancer_name,
                   pr.niche, pr.skills, pr.bio,
                   p.message, p.proposed_price, p.status, p.created_at
            FROM proposals p
            JOIN users u ON u.id = p.freelancer_id
            LEFT JOIN profiles pr ON pr.user_id = p.freelancer_id
            WHERE p.job_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_proposals_for_freelancer(
        &self,
        freelancer_id: Uuid,
    ) -> Result<Vec<ProposalWithJob>, sqlx::Error> {
        sqlx::query_as::<_, ProposalWithJob>(
            r#"
            SELECT p.id, p.job_id, j.title AS job_title, j.description AS job_description,
                   j.budget_min, j.budget_max, j.status AS job_status,
                   j.owner_id, o.name AS owner_name,
                   p.message, p.proposed_price, p.status, p.created_at
            FROM proposals p
            JOIN jobs j ON j.id = p.job_id
            JOIN users o ON o.id = j.owner_id
            WHERE p.freelancer_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(freelancer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_proposal_status(
        &self,
        proposal_id: Uuid,
        status: ProposalStatus,
    ) -> Result<Proposal, sqlx::Error> {
        sqlx::query_as::<_, Proposal>(&format!(
            r#"
            UPDATE proposals
            SET status = $2
            WHERE id = $1
            RETURNING {PROPOSAL_COLUMNS}
            "#
        ))
        .bind(proposal_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }
}
