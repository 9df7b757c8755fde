use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Rejected signup/unregister transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignupError {
    #[error("Activity not found")]
    ActivityNotFound,

    #[error("Student already signed up for this activity")]
    AlreadySignedUp,

    #[error("Student not registered for this activity")]
    NotRegistered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
}

impl SignupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SignupError::ActivityNotFound => ErrorKind::NotFound,
            SignupError::AlreadySignedUp | SignupError::NotRegistered => ErrorKind::Conflict,
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Signup(#[from] SignupError),

    #[error("Missing required query parameter: email")]
    MissingEmail,

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Signup(e) => match e.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::BAD_REQUEST,
            },
            ApiError::MissingEmail | ApiError::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
