//! Test Helpers

use jiff::{Timestamp, ToSpan};

use crate::domain::promotions::models::{NewPromotion, PromotionStatus, TagKind};

/// A valid draft promotion whose window straddles the current moment.
pub(crate) fn make_new_promotion(title: &str) -> NewPromotion {
    let now = Timestamp::now();

    NewPromotion {
        title: title.to_string(),
        description: "A limited-time offer".to_string(),
        image_url: "https://cdn.example.com/banner.png".to_string(),
        link_url: "https://shop.example.com/offer".to_string(),
        tag_kind: TagKind::Gizmart,
        tag_text: "GIZMART".to_string(),
        tag_color: "#FF1BE8".to_string(),
        start_date: now - 1.hour(),
        end_date: now + 1.hour(),
        priority: None,
        status: PromotionStatus::Draft,
        utm_campaign: None,
    }
}
