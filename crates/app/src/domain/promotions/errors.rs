//! Promotions service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromotionsServiceError {
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("promotion not found")]
    NotFound,

    #[error("invalid redirect target")]
    InvalidRedirectTarget,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PromotionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            // The `pr_bubbles` CHECK constraints back the date-window and
            // counter invariants; surface them as caller-fixable input errors.
            Some(ErrorKind::CheckViolation) => Self::Validation {
                field: "end_date",
                message: "end date must be after start date",
            },
            _ => Self::Sql(error),
        }
    }
}
