//! Get PR Bubble Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pr_maker_app::domain::promotions::models::Promotion;

use crate::{extensions::*, pr::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionResponse {
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

    /// Start of the display window
    pub start_date: String,

    /// End of the display window
    pub end_date: String,

    /// Display priority, lower shows first
    pub priority: Option<i32>,

    /// Lifecycle status
    pub status: String,

    /// UTM campaign override
    pub utm_campaign: Option<String>,

    /// Recorded view count
    pub view_count: i64,

    /// Recorded click count
    pub click_count: i64,

    /// The date and time the PR bubble was created
    pub created_at: String,

    /// The date and time the PR bubble was last updated
    pub updated_at: String,
}

impl From<Promotion> for PromotionResponse {
    fn from(promotion: Promotion) -> Self {
        PromotionResponse {
            uuid: promotion.uuid.into_uuid(),
            title: promotion.title,
            description: promotion.description,
            image_url: promotion.image_url,
            link_url: promotion.link_url,
            tag_kind: promotion.tag_kind.as_str().to_string(),
            tag_text: promotion.tag_text,
            tag_color: promotion.tag_color,
            start_date: promotion.start_date.to_string(),
            end_date: promotion.end_date.to_string(),
            priority: promotion.priority,
            status: promotion.status.as_str().to_string(),
            utm_campaign: promotion.utm_campaign,
            view_count: promotion.view_count,
            click_count: promotion.click_count,
            created_at: promotion.created_at.to_string(),
            updated_at: promotion.updated_at.to_string(),
        }
    }
}

/// Get PR Bubble Handler
///
/// Returns a single PR bubble.
#[endpoint(
    tags("pr"),
    summary = "Get PR Bubble",
    security(("api_key" = []))
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let promotion = state
        .promotions
        .get_promotion(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(promotion.into()))
}
