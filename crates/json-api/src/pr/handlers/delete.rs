//! Delete PR Bubble Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, pr::errors::into_status_error, state::State};

/// Delete PR Bubble Handler
#[endpoint(
    tags("pr"),
    summary = "Delete PR Bubble",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "PR bubble deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "PR bubble not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .promotions
        .delete_promotion(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
