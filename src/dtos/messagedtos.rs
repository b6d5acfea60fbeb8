use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct SendMessageDto {
    #[validate(required(message = "Job ID is required"))]
    pub job_id: Option<Uuid>,

    #[validate(
        required(message = "Message text is required"),
        length(min = 1, message = "Message text is required")
    )]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_requires_job_and_text() {
        let dto = SendMessageDto {
            job_id: None,
            text: Some("hello".into()),
        };
        assert!(dto.validate().is_err());

        let dto = SendMessageDto {
            job_id: Some(Uuid::new_v4()),
            text: Some("".into()),
        };
        assert!(dto.validate().is_err());
    }
}
