//! Active PR Bubbles Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pr_maker_app::domain::promotions::models::Promotion;

use crate::{extensions::*, pr::errors::into_status_error, state::State};

/// Public card shape for a live PR bubble. Counters and lifecycle fields
/// stay internal.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ActivePromotionResponse {
    /// The unique identifier of the PR bubble
    pub uuid: Uuid,

    /// Display title
    pub title: String,

    /// Display description
    pub description: String,

    /// Banner image URL
    pub image_url: String,

    /// Destination URL
    pub link_url: String,

    /// Tag kind, `gizmart` or `custom`
    pub tag_kind: String,

    /// Tag label text
    pub tag_text: String,

    /// Tag colour as `#RRGGBB`
    pub tag_color: String,

    /// Display priority, lower shows first
    pub priority: Option<i32>,
}

impl From<Promotion> for ActivePromotionResponse {
    fn from(promotion: Promotion) -> Self {
        ActivePromotionResponse {
            uuid: promotion.uuid.into_uuid(),
            title: promotion.title,
            description: promotion.description,
            image_url: promotion.image_url,
            link_url: promotion.link_url,
            tag_kind: promotion.tag_kind.as_str().to_string(),
            tag_text: promotion.tag_text,
            tag_color: promotion.tag_color,
            priority: promotion.priority,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ActivePromotionsResponse {
    /// The list of live PR bubbles, highest priority first
    pub items: Vec<ActivePromotionResponse>,
}

/// Active PR Bubbles Handler
///
/// Returns the PR bubbles currently inside their display window.
#[endpoint(
    tags("pr"),
    summary = "List Active PR Bubbles",
    security(("api_key" = []))
)]
pub(crate) async fn handler(
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<ActivePromotionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let promotions = state
        .promotions
        .active_promotions(limit.into_inner(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ActivePromotionsResponse {
        items: promotions.into_iter().map(Into::into).collect(),
    }))
}
