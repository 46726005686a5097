//! Promotion Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Promotion UUID
pub type PromotionUuid = TypedUuid<Promotion>;

/// Promotion status.
///
/// Transitions are unconstrained: any status may be set to any other via an
/// update. "Currently active" is derived from the status together with the
/// date window, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionStatus {
    Draft,
    Active,
    Inactive,
}

impl PromotionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    #[must_use]
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// Banner tag kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Gizmart,
    Custom,
}

impl TagKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gizmart => "gizmart",
            Self::Custom => "custom",
        }
    }

    #[must_use]
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "gizmart" => Some(Self::Gizmart),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Counter selector for track events.
///
/// The wire representation is restricted to exactly `view` and `click`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    View,
    Click,
}

impl TrackKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Click => "click",
        }
    }
}

/// Promotion Model
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion {
    pub uuid: PromotionUuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link_url: String,
    pub tag_kind: TagKind,
    pub tag_text: String,
    pub tag_color: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub priority: Option<i32>,
    pub status: PromotionStatus,
    pub utm_campaign: Option<String>,
    pub view_count: i64,
    pub click_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Promotion {
    /// The campaign tag used for redirect attribution, falling back to a
    /// value derived from the promotion's identifier.
    #[must_use]
    pub fn utm_campaign_or_default(&self) -> String {
        self.utm_campaign
            .clone()
            .unwrap_or_else(|| format!("pr_{}", self.uuid))
    }
}

/// New Promotion Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromotion {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link_url: String,
    pub tag_kind: TagKind,
    pub tag_text: String,
    pub tag_color: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub priority: Option<i32>,
    pub status: PromotionStatus,
    pub utm_campaign: Option<String>,
}

/// Promotion Patch Model
///
/// Every field is presence-flagged: `None` means "leave untouched", while
/// `Some(..)` carries the new value. The nullable columns use a nested
/// `Option` so setting them back to `NULL` stays distinguishable from
/// omitting them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromotionPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub tag_kind: Option<TagKind>,
    pub tag_text: Option<String>,
    pub tag_color: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub priority: Option<Option<i32>>,
    pub status: Option<PromotionStatus>,
    pub utm_campaign: Option<Option<String>>,
}

impl PromotionPatch {
    /// Apply the patch on top of a stored promotion, returning the merged
    /// promotion to write back.
    #[must_use]
    pub fn apply(self, mut promotion: Promotion) -> Promotion {
        if let Some(title) = self.title {
            promotion.title = title;
        }
        if let Some(description) = self.description {
            promotion.description = description;
        }
        if let Some(image_url) = self.image_url {
            promotion.image_url = image_url;
        }
        if let Some(link_url) = self.link_url {
            promotion.link_url = link_url;
        }
        if let Some(tag_kind) = self.tag_kind {
            promotion.tag_kind = tag_kind;
        }
        if let Some(tag_text) = self.tag_text {
            promotion.tag_text = tag_text;
        }
        if let Some(tag_color) = self.tag_color {
            promotion.tag_color = tag_color;
        }
        if let Some(start_date) = self.start_date {
            promotion.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            promotion.end_date = end_date;
        }
        if let Some(priority) = self.priority {
            promotion.priority = priority;
        }
        if let Some(status) = self.status {
            promotion.status = status;
        }
        if let Some(utm_campaign) = self.utm_campaign {
            promotion.utm_campaign = utm_campaign;
        }

        promotion
    }
}

/// One page of promotions plus the total match count.
///
/// The total is computed with the same filter inside the same transaction,
/// so it is always consistent with the page contents.
#[derive(Debug, Clone)]
pub struct PromotionPage {
    pub items: Vec<Promotion>,
    pub total: i64,
}

/// Counter snapshot with the derived click-through rate.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionStats {
    pub uuid: PromotionUuid,
    pub title: String,
    pub view_count: i64,
    pub click_count: i64,
    pub ctr: f64,
    pub created_at: Timestamp,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: PromotionStatus,
}
