mod create;
mod edit;
mod list;
mod send_email;
mod upload;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use actix_web::ResponseError;
pub use create::*;
pub use edit::*;
pub use list::*;
pub use send_email::*;
pub use upload::*;

use crate::domain::ValidationError;
use crate::spreadsheet::ParseError;
use crate::store::StoreError;
use crate::utils::error_chain_fmt;
use crate::utils::failure_body;

#[derive(thiserror::Error)]
pub enum MemberError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Member not found")]
    NotFound,
    #[error("{0}")]
    BadUpload(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for MemberError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for MemberError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) | Self::BadUpload(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // the cause chain is logged by TracingLogger, not sent to the client
            Self::UnexpectedError(_) => "Server error".to_string(),
            e => e.to_string(),
        };
        HttpResponse::build(self.status_code()).json(failure_body(&message))
    }
}

impl From<ValidationError> for MemberError {
    fn from(e: ValidationError) -> Self { Self::ValidationError(e.to_string()) }
}

impl From<StoreError> for MemberError {
    fn from(e: StoreError) -> Self {
        match e {
            e @ StoreError::DuplicateEmail(_) => Self::ValidationError(e.to_string()),
            StoreError::UnexpectedError(e) => Self::UnexpectedError(e),
        }
    }
}

impl From<ParseError> for MemberError {
    fn from(e: ParseError) -> Self { Self::BadUpload(e.to_string()) }
}
