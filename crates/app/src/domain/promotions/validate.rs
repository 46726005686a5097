//! Field-level and cross-field validation for promotion writes.

use jiff::Timestamp;

use crate::domain::promotions::{
    errors::PromotionsServiceError,
    models::{NewPromotion, PromotionPatch},
};

const TITLE_MAX: usize = 60;
const DESCRIPTION_MAX: usize = 200;
const URL_MAX: usize = 500;
const TAG_TEXT_MAX: usize = 50;
const UTM_CAMPAIGN_MAX: usize = 100;

/// Validate a new promotion and normalise the tag colour to upper case.
pub(crate) fn validate_new(
    promotion: &mut NewPromotion,
) -> Result<(), PromotionsServiceError> {
    max_chars("title", &promotion.title, TITLE_MAX)?;
    max_chars("description", &promotion.description, DESCRIPTION_MAX)?;
    max_chars("image_url", &promotion.image_url, URL_MAX)?;
    max_chars("link_url", &promotion.link_url, URL_MAX)?;
    max_chars("tag_text", &promotion.tag_text, TAG_TEXT_MAX)?;

    if let Some(campaign) = &promotion.utm_campaign {
        max_chars("utm_campaign", campaign, UTM_CAMPAIGN_MAX)?;
    }

    promotion.tag_color = hex_color(&promotion.tag_color)?;

    date_window(promotion.start_date, promotion.end_date)?;

    Ok(())
}

/// Validate a patch and normalise the tag colour when present.
///
/// The date window is cross-checked only when both ends arrive in the same
/// patch; a lone `end_date` is checked against the stored row by the
/// `pr_bubbles` CHECK constraint instead.
pub(crate) fn validate_patch(
    patch: &mut PromotionPatch,
) -> Result<(), PromotionsServiceError> {
    if let Some(title) = &patch.title {
        max_chars("title", title, TITLE_MAX)?;
    }
    if let Some(description) = &patch.description {
        max_chars("description", description, DESCRIPTION_MAX)?;
    }
    if let Some(image_url) = &patch.image_url {
        max_chars("image_url", image_url, URL_MAX)?;
    }
    if let Some(link_url) = &patch.link_url {
        max_chars("link_url", link_url, URL_MAX)?;
    }
    if let Some(tag_text) = &patch.tag_text {
        max_chars("tag_text", tag_text, TAG_TEXT_MAX)?;
    }
    if let Some(Some(campaign)) = &patch.utm_campaign {
        max_chars("utm_campaign", campaign, UTM_CAMPAIGN_MAX)?;
    }

    if let Some(color) = &patch.tag_color {
        patch.tag_color = Some(hex_color(color)?);
    }

    if let (Some(start), Some(end)) = (patch.start_date, patch.end_date) {
        date_window(start, end)?;
    }

    Ok(())
}

/// Check a `#RRGGBB` colour and return its upper-cased form.
fn hex_color(value: &str) -> Result<String, PromotionsServiceError> {
    let invalid = PromotionsServiceError::Validation {
        field: "tag_color",
        message: "must be a hex colour of the form #RRGGBB",
    };

    let Some(digits) = value.strip_prefix('#') else {
        return Err(invalid);
    };

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid);
    }

    Ok(value.to_ascii_uppercase())
}

fn date_window(start: Timestamp, end: Timestamp) -> Result<(), PromotionsServiceError> {
    if end <= start {
        return Err(PromotionsServiceError::Validation {
            field: "end_date",
            message: "end date must be after start date",
        });
    }

    Ok(())
}

fn max_chars(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), PromotionsServiceError> {
    if value.chars().count() > max {
        return Err(PromotionsServiceError::Validation {
            field,
            message: "value is too long",
        });
    }

    Ok(())
}
