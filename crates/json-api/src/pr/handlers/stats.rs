//! PR Bubble Stats Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pr_maker_app::domain::promotions::models::PromotionStats;

use crate::{extensions::*, pr::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatsResponse {
    /// The unique identifier of the PR bubble
    pub uuid: Uuid,

    /// Display title
    pub title: String,

    /// Recorded view count
    pub view_count: i64,

    /// Recorded click count
    pub click_count: i64,

    /// Click-through rate as a percentage, rounded to two decimals
    pub ctr: f64,

    /// The date and time the PR bubble was created
    pub created_at: String,

    /// Start of the display window
    pub start_date: String,

    /// End of the display window
    pub end_date: String,

    /// Lifecycle status
    pub status: String,
}

impl From<PromotionStats> for StatsResponse {
    fn from(stats: PromotionStats) -> Self {
        StatsResponse {
            uuid: stats.uuid.into_uuid(),
            title: stats.title,
            view_count: stats.view_count,
            click_count: stats.click_count,
            ctr: stats.ctr,
            created_at: stats.created_at.to_string(),
            start_date: stats.start_date.to_string(),
            end_date: stats.end_date.to_string(),
            status: stats.status.as_str().to_string(),
        }
    }
}

/// PR Bubble Stats Handler
///
/// Returns the counter snapshot and click-through rate.
#[endpoint(
    tags("pr"),
    summary = "PR Bubble Stats",
    security(("api_key" = []))
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<StatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state
        .promotions
        .promotion_stats(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(stats.into()))
}
