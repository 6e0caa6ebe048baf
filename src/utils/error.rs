use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use thiserror::Error;

use crate::database::repository::RepoError;
use crate::views;

/// Notice shown when a persistence call fails, kept distinct from the
/// "not found" notices so users can tell the two apart.
pub const GENERIC_FAILURE: &str = "Something went wrong, please try again.";

#[derive(Debug, Error)]
pub enum CustomError {
    /// Short-circuits a handler with a redirect. Any flash notice must already
    /// have been pushed onto the session.
    #[error("Redirecting to {0}")]
    Redirect(String),

    #[error("Bad Request: {0}")]
    BadRequestError(String),

    #[error("Conflict: {0}")]
    ConflictError(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl CustomError {
    pub fn redirect(location: impl Into<String>) -> Self {
        CustomError::Redirect(location.into())
    }
}

impl From<RepoError> for CustomError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(msg) => CustomError::ConflictError(msg),
            RepoError::Database(msg) => CustomError::InternalServerError(msg),
        }
    }
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match *self {
            CustomError::Redirect(..) => StatusCode::FOUND,
            CustomError::BadRequestError(..) => StatusCode::BAD_REQUEST,
            CustomError::ConflictError(..) => StatusCode::CONFLICT,
            CustomError::InternalServerError(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let CustomError::Redirect(location) = self {
            return HttpResponse::Found()
                .insert_header((header::LOCATION, location.as_str()))
                .finish();
        }

        // Internal details stay in the log, not in the page.
        let message = match self {
            CustomError::InternalServerError(detail) => {
                log::error!("internal error: {}", detail);
                GENERIC_FAILURE.to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code())
            .content_type("text/html; charset=utf-8")
            .body(views::error_page(self.status_code(), &message))
    }
}
