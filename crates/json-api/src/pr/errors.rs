//! PR Bubble Errors

use salvo::http::StatusError;
use tracing::error;

use pr_maker_app::domain::promotions::PromotionsServiceError;

pub(crate) fn into_status_error(error: PromotionsServiceError) -> StatusError {
    match error {
        PromotionsServiceError::Validation { field, message } => {
            StatusError::bad_request().brief(format!("{field}: {message}"))
        }
        PromotionsServiceError::NotFound => StatusError::not_found().brief("PR bubble not found"),
        PromotionsServiceError::InvalidRedirectTarget => {
            StatusError::bad_request().brief("Invalid redirect target")
        }
        PromotionsServiceError::Sql(source) => {
            error!("promotion query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
