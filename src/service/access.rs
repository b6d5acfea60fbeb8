// service/access.rs
//
// One place for the "who may act on this job" rules instead of per-route
// conditionals.
use crate::models::{
    jobmodel::Job,
    usermodel::{User, UserRole},
};

/// How a user relates to a job, for authorization purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobAccess {
    /// The job's owner (or an admin acting as one where routes allow it).
    Owner,
    /// The chosen freelancer on the job.
    ChosenFreelancer,
    /// An admin who is neither owner nor chosen freelancer.
    Admin,
    /// No relationship.
    None,
}

pub fn job_access(user: &User, job: &Job) -> JobAccess {
    if job.owner_id == user.id {
        JobAccess::Owner
    } else if job.chosen_freelancer_id == Some(user.id) {
        JobAccess::ChosenFreelancer
    } else if user.role == UserRole::Admin {
        JobAccess::Admin
    } else {
        JobAccess::None
    }
}

impl JobAccess {
    /// Owner, chosen freelancer and admin may read and post messages.
    pub fn is_participant_or_admin(&self) -> bool {
        !matches!(self, JobAccess::None)
    }

    /// Only the two sides of the engagement may complete or review; admins
    /// are deliberately excluded here.
    pub fn is_participant(&self) -> bool {
        matches!(self, JobAccess::Owner | JobAccess::ChosenFreelancer)
    }

    /// Owner or admin: job edits and proposal triage.
    pub fn is_owner_or_admin(&self) -> bool {
        matches!(self, JobAccess::Owner | JobAccess::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::jobmodel::JobStatus;

    fn user(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            name: "someone".into(),
            email: "someone@test.dev".into(),
            password_hash: "hash".into(),
            role,
            active: true,
            email_verified: true,
            verification_token: None,
            token_expires_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn job(owner_id: Uuid, chosen: Option<Uuid>) -> Job {
        Job {
            id: Uuid::new_v4(),
            owner_id,
            title: "t".into(),
            description: "d".into(),
            category: "c".into(),
            budget_min: 1.0,
            budget_max: 2.0,
            deadline: Utc::now(),
            status: JobStatus::Open,
            chosen_freelancer_id: chosen,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn owner_is_owner() {
        let owner = user(UserRole::BusinessOwner);
        let j = job(owner.id, None);
        assert_eq!(job_access(&owner, &j), JobAccess::Owner);
        assert!(job_access(&owner, &j).is_owner_or_admin());
        assert!(job_access(&owner, &j).is_participant());
    }

    #[test]
    fn chosen_freelancer_is_participant_but_not_owner() {
        let freelancer = user(UserRole::Freelancer);
        let j = job(Uuid::new_v4(), Some(freelancer.id));
        let access = job_access(&freelancer, &j);
        assert_eq!(access, JobAccess::ChosenFreelancer);
        assert!(access.is_participant());
        assert!(access.is_participant_or_admin());
        assert!(!access.is_owner_or_admin());
    }

    #[test]
    fn unrelated_freelancer_has_no_access() {
        let freelancer = user(UserRole::Freelancer);
        let j = job(Uuid::new_v4(), Some(Uuid::new_v4()));
        let access = job_access(&freelancer, &j);
        assert_eq!(access, JobAccess::None);
        assert!(!access.is_participant_or_admin());
    }

    #[test]
    fn admin_can_observe_but_not_participate() {
        let admin = user(UserRole::Admin);
        let j = job(Uuid::new_v4(), Some(Uuid::new_v4()));
        let access = job_access(&admin, &j);
        assert_eq!(access, JobAccess::Admin);
        assert!(access.is_participant_or_admin());
        assert!(access.is_owner_or_admin());
        assert!(!access.is_participant());
    }

    #[test]
    fn owner_relationship_wins_over_role() {
        // An admin who owns a job is treated as its owner.
        let admin = user(UserRole::Admin);
        let j = job(admin.id, None);
        assert_eq!(job_access(&admin, &j), JobAccess::Owner);
    }
}
