use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::proposalmodel::ProposalStatus;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateProposalDto {
    #[validate(required(message = "Job ID is required"))]
    pub job_id: Option<Uuid>,

    #[validate(
        required(message = "Message is required"),
        length(min = 1, message = "Message is required")
    )]
    pub message: Option<String>,

    #[validate(
        required(message = "Proposed price is required"),
        range(min = 0.0, message = "Proposed price must not be negative")
    )]
    pub proposed_price: Option<f64>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProposalStatusDto {
    #[validate(required(message = "Status is required"))]
    pub status: Option<ProposalStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proposal_requires_all_fields() {
        let dto = CreateProposalDto {
            job_id: Some(Uuid::new_v4()),
            message: None,
            proposed_price: Some(500.0),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn negative_price_is_rejected() {
        let dto = CreateProposalDto {
            job_id: Some(Uuid::new_v4()),
            message: Some("I can do this".into()),
            proposed_price: Some(-5.0),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn status_parses_wire_values() {
        let dto: UpdateProposalStatusDto =
            serde_json::from_str("{\"status\":\"REJECTED\"}").unwrap();
        assert_eq!(dto.status, Some(ProposalStatus::Rejected));
    }
}
