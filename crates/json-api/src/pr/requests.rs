//! PR Bubble request payloads.

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Deserializer, Serialize};

use pr_maker_app::domain::promotions::models::{
    NewPromotion, PromotionPatch, PromotionStatus, TagKind, TrackKind,
};

/// Wire form of a promotion status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum PromotionStatusRequest {
    Draft,
    Active,
    Inactive,
}

impl From<PromotionStatusRequest> for PromotionStatus {
    fn from(status: PromotionStatusRequest) -> Self {
        match status {
            PromotionStatusRequest::Draft => PromotionStatus::Draft,
            PromotionStatusRequest::Active => PromotionStatus::Active,
            PromotionStatusRequest::Inactive => PromotionStatus::Inactive,
        }
    }
}

/// Wire form of a tag kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TagKindRequest {
    Gizmart,
    Custom,
}

impl From<TagKindRequest> for TagKind {
    fn from(kind: TagKindRequest) -> Self {
        match kind {
            TagKindRequest::Gizmart => TagKind::Gizmart,
            TagKindRequest::Custom => TagKind::Custom,
        }
    }
}

/// Wire form of a tracking event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TrackKindRequest {
    View,
    Click,
}

impl From<TrackKindRequest> for TrackKind {
    fn from(kind: TrackKindRequest) -> Self {
        match kind {
            TrackKindRequest::View => TrackKind::View,
            TrackKindRequest::Click => TrackKind::Click,
        }
    }
}

fn default_tag_kind() -> TagKindRequest {
    TagKindRequest::Gizmart
}

fn default_tag_text() -> String {
    "GIZMART".to_string()
}

fn default_tag_color() -> String {
    "#FF1BE8".to_string()
}

fn default_status() -> PromotionStatusRequest {
    PromotionStatusRequest::Draft
}

/// Create PR Bubble Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePromotionRequest {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link_url: String,
    #[serde(default = "default_tag_kind")]
    pub tag_kind: TagKindRequest,
    #[serde(default = "default_tag_text")]
    pub tag_text: String,
    #[serde(default = "default_tag_color")]
    pub tag_color: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default = "default_status")]
    pub status: PromotionStatusRequest,
    #[serde(default)]
    pub utm_campaign: Option<String>,
}

impl CreatePromotionRequest {
    pub(crate) fn into_new_promotion(self) -> Result<NewPromotion, StatusError> {
        Ok(NewPromotion {
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            link_url: self.link_url,
            tag_kind: self.tag_kind.into(),
            tag_text: self.tag_text,
            tag_color: self.tag_color,
            start_date: parse_timestamp(&self.start_date, "start_date")?,
            end_date: parse_timestamp(&self.end_date, "end_date")?,
            priority: self.priority,
            status: self.status.into(),
            utm_campaign: self.utm_campaign,
        })
    }
}

/// Update PR Bubble Request
///
/// Every field is optional. For `priority` and `utm_campaign` an absent
/// field means "leave unchanged" while an explicit `null` clears the
/// stored value, so those two deserialize into nested options.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatePromotionRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub tag_kind: Option<TagKindRequest>,
    #[serde(default)]
    pub tag_text: Option<String>,
    #[serde(default)]
    pub tag_color: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "some_if_present")]
    pub priority: Option<Option<i32>>,
    #[serde(default)]
    pub status: Option<PromotionStatusRequest>,
    #[serde(default, deserialize_with = "some_if_present")]
    pub utm_campaign: Option<Option<String>>,
}

impl UpdatePromotionRequest {
    pub(crate) fn into_patch(self) -> Result<PromotionPatch, StatusError> {
        Ok(PromotionPatch {
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            link_url: self.link_url,
            tag_kind: self.tag_kind.map(Into::into),
            tag_text: self.tag_text,
            tag_color: self.tag_color,
            start_date: self
                .start_date
                .as_deref()
                .map(|raw| parse_timestamp(raw, "start_date"))
                .transpose()?,
            end_date: self
                .end_date
                .as_deref()
                .map(|raw| parse_timestamp(raw, "end_date"))
                .transpose()?,
            priority: self.priority,
            status: self.status.map(Into::into),
            utm_campaign: self.utm_campaign,
        })
    }
}

/// Track PR Bubble Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TrackPromotionRequest {
    /// Event kind, `view` or `click`
    #[serde(rename = "type")]
    pub kind: TrackKindRequest,
}

fn parse_timestamp(raw: &str, field: &str) -> Result<Timestamp, StatusError> {
    raw.parse().map_err(|_parse| {
        StatusError::bad_request().brief(format!("{field} must be an RFC 3339 timestamp"))
    })
}

/// Distinguishes a field set to `null` from a field that is absent.
fn some_if_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
