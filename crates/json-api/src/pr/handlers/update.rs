//! Update PR Bubble Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    pr::{errors::into_status_error, handlers::get::PromotionResponse, requests::UpdatePromotionRequest},
    state::State,
};

/// Update PR Bubble Handler
///
/// Applies a partial update; omitted fields keep their stored values.
#[endpoint(
    tags("pr"),
    summary = "Update PR Bubble",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::OK, description = "PR bubble updated"),
        (status_code = StatusCode::NOT_FOUND, description = "PR bubble not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdatePromotionRequest>,
    depot: &mut Depot,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let patch = json.into_inner().into_patch()?;

    let updated = state
        .promotions
        .update_promotion(uuid.into_inner().into(), patch)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
