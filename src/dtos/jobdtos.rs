use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::jobmodel::JobStatus;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateJobDto {
    #[validate(
        required(message = "Title is required"),
        length(min = 1, message = "Title is required")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "Description is required"),
        length(min = 1, message = "Description is required")
    )]
    pub description: Option<String>,

    #[validate(
        required(message = "Category is required"),
        length(min = 1, message = "Category is required")
    )]
    pub category: Option<String>,

    #[validate(
        required(message = "Minimum budget is required"),
        range(min = 0.0, message = "Minimum budget must not be negative")
    )]
    pub budget_min: Option<f64>,

    #[validate(
        required(message = "Maximum budget is required"),
        range(min = 0.0, message = "Maximum budget must not be negative")
    )]
    pub budget_max: Option<f64>,

    #[validate(required(message = "Deadline is required"))]
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateJobDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0.0, message = "Minimum budget must not be negative"))]
    pub budget_min: Option<f64>,
    #[validate(range(min = 0.0, message = "Maximum budget must not be negative"))]
    pub budget_max: Option<f64>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: Option<JobStatus>,
}

#[derive(Debug, Deserialize)]
pub struct JobListQueryDto {
    pub owner: Option<Uuid>,
    pub status: Option<JobStatus>,
    pub category: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SelectFreelancerDto {
    #[validate(required(message = "freelancerId is required"))]
    #[serde(rename = "freelancerId")]
    pub freelancer_id: Option<Uuid>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CompleteJobDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_job_requires_every_field() {
        let dto = CreateJobDto {
            title: Some("Logo design".into()),
            description: Some("A fresh logo".into()),
            category: Some("design".into()),
            budget_min: Some(100.0),
            budget_max: None,
            deadline: Some(Utc::now()),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn negative_budget_is_rejected() {
        let dto = CreateJobDto {
            title: Some("Logo design".into()),
            description: Some("A fresh logo".into()),
            category: Some("design".into()),
            budget_min: Some(-1.0),
            budget_max: Some(100.0),
            deadline: Some(Utc::now()),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn complete_job_rating_bounds() {
        let ok = CompleteJobDto {
            rating: Some(5),
            comment: None,
        };
        assert!(ok.validate().is_ok());

        let too_high = CompleteJobDto {
            rating: Some(6),
            comment: None,
        };
        assert!(too_high.validate().is_err());

        let none = CompleteJobDto::default();
        assert!(none.validate().is_ok());
    }

    #[test]
    fn select_freelancer_uses_camel_case_key() {
        let dto: SelectFreelancerDto =
            serde_json::from_str(&format!("{{\"freelancerId\":\"{}\"}}", Uuid::new_v4()))
                .unwrap();
        assert!(dto.freelancer_id.is_some());
    }
}
