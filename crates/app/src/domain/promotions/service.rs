//! Promotions Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::promotions::{
        errors::PromotionsServiceError,
        models::{
            NewPromotion, Promotion, PromotionPage, PromotionPatch, PromotionStats,
            PromotionStatus, PromotionUuid, TrackKind,
        },
        redirect,
        repository::PgPromotionsRepository,
        validate,
    },
};

/// Suffix appended to duplicated titles.
const COPY_SUFFIX: &str = "(コピー)";

/// Longest source-title prefix kept when duplicating.
const COPY_BASE_MAX: usize = 35;

/// Hard cap on a duplicated title.
const COPY_TITLE_MAX: usize = 40;

const LIST_LIMIT_MAX: i64 = 100;
const ACTIVE_LIMIT_MAX: i64 = 50;

#[derive(Debug, Clone)]
pub struct PgPromotionsService {
    db: Db,
    repository: PgPromotionsRepository,
}

impl PgPromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPromotionsRepository::new(),
        }
    }
}

#[async_trait]
impl PromotionsService for PgPromotionsService {
    #[tracing::instrument(
        name = "promotions.service.list_promotions",
        skip(self),
        fields(status = status.map(PromotionStatus::as_str)),
        err
    )]
    async fn list_promotions(
        &self,
        status: Option<PromotionStatus>,
        page: i64,
        limit: i64,
    ) -> Result<PromotionPage, PromotionsServiceError> {
        if page < 1 {
            return Err(PromotionsServiceError::Validation {
                field: "page",
                message: "page numbers start at 1",
            });
        }

        if !(1..=LIST_LIMIT_MAX).contains(&limit) {
            return Err(PromotionsServiceError::Validation {
                field: "limit",
                message: "limit must be between 1 and 100",
            });
        }

        let mut tx = self.db.begin().await?;

        // Count and page share the transaction so total stays consistent
        // with the returned window.
        let total = self.repository.count_promotions(&mut tx, status).await?;

        let items = self
            .repository
            .list_promotions(&mut tx, status, (page - 1) * limit, limit)
            .await?;

        tx.commit().await?;

        Ok(PromotionPage { items, total })
    }

    #[tracing::instrument(
        name = "promotions.service.get_promotion",
        skip(self),
        fields(promotion_uuid = %uuid),
        err
    )]
    async fn get_promotion(
        &self,
        uuid: PromotionUuid,
    ) -> Result<Promotion, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let promotion = self.repository.get_promotion(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(promotion)
    }

    #[tracing::instrument(
        name = "promotions.service.create_promotion",
        skip(self, promotion),
        fields(promotion_uuid = tracing::field::Empty),
        err
    )]
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<Promotion, PromotionsServiceError> {
        let mut promotion = promotion;

        validate::validate_new(&mut promotion)?;

        let uuid = PromotionUuid::new();

        tracing::Span::current().record("promotion_uuid", tracing::field::display(uuid));

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_promotion(&mut tx, uuid, promotion)
            .await?;

        tx.commit().await?;

        info!(promotion_uuid = %created.uuid, "created promotion");

        Ok(created)
    }

    #[tracing::instrument(
        name = "promotions.service.update_promotion",
        skip(self, patch),
        fields(promotion_uuid = %uuid),
        err
    )]
    async fn update_promotion(
        &self,
        uuid: PromotionUuid,
        patch: PromotionPatch,
    ) -> Result<Promotion, PromotionsServiceError> {
        let mut patch = patch;

        validate::validate_patch(&mut patch)?;

        let mut tx = self.db.begin().await?;

        let stored = self
            .repository
            .get_promotion_for_update(&mut tx, uuid)
            .await?;

        let merged = patch.apply(stored);

        let updated = self.repository.update_promotion(&mut tx, &merged).await?;

        tx.commit().await?;

        info!(promotion_uuid = %uuid, "updated promotion");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "promotions.service.delete_promotion",
        skip(self),
        fields(promotion_uuid = %uuid),
        err
    )]
    async fn delete_promotion(
        &self,
        uuid: PromotionUuid,
    ) -> Result<(), PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_promotion(&mut tx, uuid).await?;

        if rows_affected == 0 {
            return Err(PromotionsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(promotion_uuid = %uuid, "deleted promotion");

        Ok(())
    }

    #[tracing::instrument(
        name = "promotions.service.duplicate_promotion",
        skip(self),
        fields(promotion_uuid = %uuid, copy_uuid = tracing::field::Empty),
        err
    )]
    async fn duplicate_promotion(
        &self,
        uuid: PromotionUuid,
    ) -> Result<Promotion, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let source = self.repository.get_promotion(&mut tx, uuid).await?;

        let copy_uuid = PromotionUuid::new();

        tracing::Span::current().record("copy_uuid", tracing::field::display(copy_uuid));

        let copy = NewPromotion {
            title: duplicate_title(&source.title),
            description: source.description,
            image_url: source.image_url,
            link_url: source.link_url,
            tag_kind: source.tag_kind,
            tag_text: source.tag_text,
            tag_color: source.tag_color,
            start_date: source.start_date,
            end_date: source.end_date,
            priority: source.priority,
            status: PromotionStatus::Draft,
            utm_campaign: source.utm_campaign,
        };

        let created = self
            .repository
            .create_promotion(&mut tx, copy_uuid, copy)
            .await?;

        tx.commit().await?;

        info!(promotion_uuid = %uuid, copy_uuid = %created.uuid, "duplicated promotion");

        Ok(created)
    }

    #[tracing::instrument(name = "promotions.service.active_promotions", skip(self), err)]
    async fn active_promotions(
        &self,
        limit: Option<i64>,
        now: Timestamp,
    ) -> Result<Vec<Promotion>, PromotionsServiceError> {
        if let Some(limit) = limit
            && !(1..=ACTIVE_LIMIT_MAX).contains(&limit)
        {
            return Err(PromotionsServiceError::Validation {
                field: "limit",
                message: "limit must be between 1 and 50",
            });
        }

        let mut tx = self.db.begin().await?;

        let items = self.repository.active_promotions(&mut tx, now, limit).await?;

        tx.commit().await?;

        Ok(items)
    }

    #[tracing::instrument(
        name = "promotions.service.track_promotion",
        skip(self),
        fields(promotion_uuid = %uuid, kind = kind.as_str()),
        err
    )]
    async fn track_promotion(
        &self,
        uuid: PromotionUuid,
        kind: TrackKind,
    ) -> Result<(), PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.track_promotion(&mut tx, uuid, kind).await?;

        if rows_affected == 0 {
            return Err(PromotionsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "promotions.service.promotion_stats",
        skip(self),
        fields(promotion_uuid = %uuid),
        err
    )]
    async fn promotion_stats(
        &self,
        uuid: PromotionUuid,
    ) -> Result<PromotionStats, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let promotion = self.repository.get_promotion(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(PromotionStats {
            uuid: promotion.uuid,
            title: promotion.title,
            view_count: promotion.view_count,
            click_count: promotion.click_count,
            ctr: click_through_rate(promotion.click_count, promotion.view_count),
            created_at: promotion.created_at,
            start_date: promotion.start_date,
            end_date: promotion.end_date,
            status: promotion.status,
        })
    }

    #[tracing::instrument(
        name = "promotions.service.redirect_promotion",
        skip(self),
        fields(promotion_uuid = %uuid),
        err
    )]
    async fn redirect_promotion(
        &self,
        uuid: PromotionUuid,
        now: Timestamp,
    ) -> Result<String, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let promotion = self.repository.get_promotion(&mut tx, uuid).await?;

        if !redirect::is_valid_redirect_target(&promotion.link_url) {
            // The unsafe URL is logged server-side only; the caller sees a
            // generic rejection.
            warn!(promotion_uuid = %uuid, link_url = %promotion.link_url,
                "refusing redirect to unsafe link");

            return Err(PromotionsServiceError::InvalidRedirectTarget);
        }

        // Click is recorded before the redirect is issued. Running in the
        // same transaction means a concurrent delete makes the whole
        // operation NotFound instead of redirecting without a click.
        let rows_affected = self
            .repository
            .track_promotion(&mut tx, uuid, TrackKind::Click)
            .await?;

        if rows_affected == 0 {
            return Err(PromotionsServiceError::NotFound);
        }

        let target = redirect::build_redirect_url(
            &promotion.link_url,
            &promotion.utm_campaign_or_default(),
            &redirect::utm_content_stamp(now),
        )
        .map_err(|_parse| PromotionsServiceError::InvalidRedirectTarget)?;

        tx.commit().await?;

        Ok(target)
    }
}

/// Title for a duplicated promotion.
///
/// The source title is pre-truncated to 35 characters before the suffix is
/// appended, then the whole title is clamped to 40. The clamp must run
/// after the append; clamping first would let the suffix push past 40.
fn duplicate_title(title: &str) -> String {
    let mut copy: String = title.chars().take(COPY_BASE_MAX).collect();

    copy.push_str(COPY_SUFFIX);

    if copy.chars().count() > COPY_TITLE_MAX {
        copy = copy.chars().take(COPY_TITLE_MAX).collect();
    }

    copy
}

/// Percentage of views that became clicks, rounded to two decimals.
fn click_through_rate(clicks: i64, views: i64) -> f64 {
    if views <= 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let raw = clicks as f64 / views as f64 * 100.0;

    (raw * 100.0).round() / 100.0
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Page through promotions, optionally filtered by status.
    async fn list_promotions(
        &self,
        status: Option<PromotionStatus>,
        page: i64,
        limit: i64,
    ) -> Result<PromotionPage, PromotionsServiceError>;

    /// Retrieve a single promotion.
    async fn get_promotion(
        &self,
        uuid: PromotionUuid,
    ) -> Result<Promotion, PromotionsServiceError>;

    /// Create a promotion, returning the persisted row with its
    /// server-assigned identifier, defaults and timestamps.
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<Promotion, PromotionsServiceError>;

    /// Apply a partial update; untouched fields keep their stored values.
    async fn update_promotion(
        &self,
        uuid: PromotionUuid,
        patch: PromotionPatch,
    ) -> Result<Promotion, PromotionsServiceError>;

    /// Delete a promotion. Missing rows signal `NotFound`.
    async fn delete_promotion(&self, uuid: PromotionUuid)
    -> Result<(), PromotionsServiceError>;

    /// Copy a promotion with a suffixed title, draft status and zeroed
    /// counters.
    async fn duplicate_promotion(
        &self,
        uuid: PromotionUuid,
    ) -> Result<Promotion, PromotionsServiceError>;

    /// Promotions live at `now`, ordered by priority then recency.
    async fn active_promotions(
        &self,
        limit: Option<i64>,
        now: Timestamp,
    ) -> Result<Vec<Promotion>, PromotionsServiceError>;

    /// Increment the view or click counter.
    async fn track_promotion(
        &self,
        uuid: PromotionUuid,
        kind: TrackKind,
    ) -> Result<(), PromotionsServiceError>;

    /// Counter snapshot with the derived click-through rate.
    async fn promotion_stats(
        &self,
        uuid: PromotionUuid,
    ) -> Result<PromotionStats, PromotionsServiceError>;

    /// Record a click and build the UTM-tagged redirect target.
    async fn redirect_promotion(
        &self,
        uuid: PromotionUuid,
        now: Timestamp,
    ) -> Result<String, PromotionsServiceError>;
}
