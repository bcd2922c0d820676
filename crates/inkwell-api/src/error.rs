use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::navigation::NavError;
use crate::validate::ValidationError;

/// Handler failures, each mapped to the status and plain-text body the client sees.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("404 page not found")]
    NotFound,

    /// Details are logged where the failure happens; the client only gets the summary.
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<NavError> for ApiError {
    fn from(err: NavError) -> Self {
        match err {
            NavError::NotFound { .. } => ApiError::NotFound,
            NavError::Inconsistent { .. } => ApiError::Internal("Error retrieving entry"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
