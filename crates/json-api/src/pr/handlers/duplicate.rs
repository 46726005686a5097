//! Duplicate PR Bubble Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    pr::{errors::into_status_error, handlers::get::PromotionResponse},
    state::State,
};

/// Duplicate PR Bubble Handler
///
/// Creates a draft copy of an existing PR bubble with zeroed counters.
#[endpoint(
    tags("pr"),
    summary = "Duplicate PR Bubble",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "PR bubble duplicated"),
        (status_code = StatusCode::NOT_FOUND, description = "PR bubble not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let copy = state
        .promotions
        .duplicate_promotion(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/pr/{}", copy.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(copy.into()))
}
