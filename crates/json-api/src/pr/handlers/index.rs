//! PR Bubble Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use pr_maker_app::domain::promotions::models::PromotionStatus;

use crate::{extensions::*, pr::errors::into_status_error, pr::handlers::get::PromotionResponse, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionListResponse {
    /// The page of PR bubbles
    pub items: Vec<PromotionResponse>,

    /// Total number of PR bubbles matching the filter
    pub total: i64,

    /// The requested page number
    pub page: i64,

    /// The requested page size
    pub limit: i64,
}

/// PR Bubble Index Handler
///
/// Returns a page of PR bubbles, newest first.
#[endpoint(
    tags("pr"),
    summary = "List PR Bubbles",
    security(("api_key" = []))
)]
pub(crate) async fn handler(
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<PromotionListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = page.into_inner().unwrap_or(1);
    let limit = limit.into_inner().unwrap_or(20);

    let status = status
        .into_inner()
        .map(|raw| {
            PromotionStatus::from_str(&raw).ok_or_else(|| {
                StatusError::bad_request().brief("status must be draft, active or inactive")
            })
        })
        .transpose()?;

    let promotions = state
        .promotions
        .list_promotions(status, page, limit)
        .await
        .map_err(into_status_error)?;

    Ok(Json(PromotionListResponse {
        items: promotions.items.into_iter().map(Into::into).collect(),
        total: promotions.total,
        page,
        limit,
    }))
}
