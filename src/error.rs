use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Canonical user-facing messages shared across handlers.
#[derive(Debug, PartialEq)]
pub enum ErrorMessage {
    WrongCredentials,
    AccountDeactivated,
    EmailTaken,
    TokenNotProvided,
    InvalidToken,
    UserNoLongerExist,
    PermissionDenied,
    EmailNotVerified,
    ServerError,
}

impl std::fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            ErrorMessage::WrongCredentials => "Invalid credentials",
            ErrorMessage::AccountDeactivated => "Account has been deactivated",
            ErrorMessage::EmailTaken => "Email already registered",
            ErrorMessage::TokenNotProvided => "Access token required",
            ErrorMessage::InvalidToken => "Invalid or expired token",
            ErrorMessage::UserNoLongerExist => "User belonging to this token no longer exists",
            ErrorMessage::PermissionDenied => "Insufficient permissions",
            ErrorMessage::EmailNotVerified => {
                "Please verify your email address to perform this action"
            }
            ErrorMessage::ServerError => "Internal server error",
        };
        write!(f, "{}", msg)
    }
}

/// Error type returned by every handler. Maps the domain error taxonomy to an
/// HTTP status plus a short JSON `{"error": message}` body.
#[derive(Debug, Clone)]
pub struct HttpError {
    pub message: String,
    pub status: StatusCode,
}

impl HttpError {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        HttpError {
            message: message.into(),
            status,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::UNAUTHORIZED)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::FORBIDDEN)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::NOT_FOUND)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::CONFLICT)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// An external collaborator (mail transport) failed.
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_GATEWAY)
    }

    /// Wrap an unexpected database error without leaking internals. The full
    /// error goes to the log, the client gets a generic message.
    pub fn from_db_error(err: sqlx::Error) -> Self {
        tracing::error!("database error: {}", err);
        Self::server_error(ErrorMessage::ServerError.to_string())
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// True when the database rejected a write because of a unique constraint,
/// which the API surfaces as a 409.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_map_to_expected_statuses() {
        assert_eq!(HttpError::bad_request("x").status, StatusCode::BAD_REQUEST);
        assert_eq!(HttpError::unauthorized("x").status, StatusCode::UNAUTHORIZED);
        assert_eq!(HttpError::forbidden("x").status, StatusCode::FORBIDDEN);
        assert_eq!(HttpError::not_found("x").status, StatusCode::NOT_FOUND);
        assert_eq!(HttpError::conflict("x").status, StatusCode::CONFLICT);
        assert_eq!(
            HttpError::server_error("x").status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(HttpError::bad_gateway("x").status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn error_messages_are_short_and_stable() {
        assert_eq!(
            ErrorMessage::WrongCredentials.to_string(),
            "Invalid credentials"
        );
        assert_eq!(
            ErrorMessage::EmailTaken.to_string(),
            "Email already registered"
        );
        assert_eq!(
            ErrorMessage::AccountDeactivated.to_string(),
            "Account has been deactivated"
        );
    }
}
