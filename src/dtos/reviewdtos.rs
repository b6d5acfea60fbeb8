use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateReviewDto {
    #[validate(required(message = "Job ID is required"))]
    pub job_id: Option<Uuid>,

    #[validate(required(message = "Recipient is required"))]
    pub to_user_id: Option<Uuid>,

    #[validate(
        required(message = "Rating is required"),
        range(min = 1, max = 5, message = "Rating must be between 1 and 5")
    )]
    pub rating: Option<i32>,

    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateReviewDto {
        CreateReviewDto {
            job_id: Some(Uuid::new_v4()),
            to_user_id: Some(Uuid::new_v4()),
            rating: Some(4),
            comment: None,
        }
    }

    #[test]
    fn rating_must_be_one_to_five() {
        for rating in 1..=5 {
            let mut dto = valid();
            dto.rating = Some(rating);
            assert!(dto.validate().is_ok(), "rating {} should be valid", rating);
        }
        for rating in [0, 6, -1] {
            let mut dto = valid();
            dto.rating = Some(rating);
            assert!(dto.validate().is_err(), "rating {} should be invalid", rating);
        }
    }

    #[test]
    fn rating_is_required() {
        let mut dto = valid();
        dto.rating = None;
        assert!(dto.validate().is_err());
    }
}
