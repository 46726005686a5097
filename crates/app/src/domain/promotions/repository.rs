//! Promotions Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::promotions::models::{
    NewPromotion, Promotion, PromotionStatus, PromotionUuid, TagKind, TrackKind,
};

const CREATE_PROMOTION_SQL: &str = include_str!("sql/create_promotion.sql");
const GET_PROMOTION_SQL: &str = include_str!("sql/get_promotion.sql");
const GET_PROMOTION_FOR_UPDATE_SQL: &str = include_str!("sql/get_promotion_for_update.sql");
const LIST_PROMOTIONS_SQL: &str = include_str!("sql/list_promotions.sql");
const COUNT_PROMOTIONS_SQL: &str = include_str!("sql/count_promotions.sql");
const UPDATE_PROMOTION_SQL: &str = include_str!("sql/update_promotion.sql");
const DELETE_PROMOTION_SQL: &str = include_str!("sql/delete_promotion.sql");
const ACTIVE_PROMOTIONS_SQL: &str = include_str!("sql/active_promotions.sql");
const TRACK_VIEW_SQL: &str = include_str!("sql/track_view.sql");
const TRACK_CLICK_SQL: &str = include_str!("sql/track_click.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromotionsRepository;

impl PgPromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: PromotionUuid,
        promotion: NewPromotion,
    ) -> Result<Promotion, sqlx::Error> {
        query_as::<Postgres, Promotion>(CREATE_PROMOTION_SQL)
            .bind(uuid.into_uuid())
            .bind(&promotion.title)
            .bind(&promotion.description)
            .bind(&promotion.image_url)
            .bind(&promotion.link_url)
            .bind(promotion.tag_kind.as_str())
            .bind(&promotion.tag_text)
            .bind(&promotion.tag_color)
            .bind(SqlxTimestamp::from(promotion.start_date))
            .bind(SqlxTimestamp::from(promotion.end_date))
            .bind(promotion.priority)
            .bind(promotion.status.as_str())
            .bind(&promotion.utm_campaign)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<Promotion, sqlx::Error> {
        query_as::<Postgres, Promotion>(GET_PROMOTION_SQL)
            .bind(promotion.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a promotion with a row lock held for the rest of the
    /// transaction. Used by read-modify-write updates.
    pub(crate) async fn get_promotion_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<Promotion, sqlx::Error> {
        query_as::<Postgres, Promotion>(GET_PROMOTION_FOR_UPDATE_SQL)
            .bind(promotion.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<PromotionStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Promotion>, sqlx::Error> {
        query_as::<Postgres, Promotion>(LIST_PROMOTIONS_SQL)
            .bind(status.map(PromotionStatus::as_str))
            .bind(offset)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<PromotionStatus>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_PROMOTIONS_SQL)
            .bind(status.map(PromotionStatus::as_str))
            .fetch_one(&mut **tx)
            .await
    }

    /// Write back every column of a merged promotion, refreshing
    /// `updated_at` unconditionally.
    pub(crate) async fn update_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: &Promotion,
    ) -> Result<Promotion, sqlx::Error> {
        query_as::<Postgres, Promotion>(UPDATE_PROMOTION_SQL)
            .bind(promotion.uuid.into_uuid())
            .bind(&promotion.title)
            .bind(&promotion.description)
            .bind(&promotion.image_url)
            .bind(&promotion.link_url)
            .bind(promotion.tag_kind.as_str())
            .bind(&promotion.tag_text)
            .bind(&promotion.tag_color)
            .bind(SqlxTimestamp::from(promotion.start_date))
            .bind(SqlxTimestamp::from(promotion.end_date))
            .bind(promotion.priority)
            .bind(promotion.status.as_str())
            .bind(&promotion.utm_campaign)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PROMOTION_SQL)
            .bind(promotion.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Promotions whose stored status is active and whose date window
    /// contains `now`, ordered by priority (NULLs last) then recency.
    pub(crate) async fn active_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        now: Timestamp,
        limit: Option<i64>,
    ) -> Result<Vec<Promotion>, sqlx::Error> {
        query_as::<Postgres, Promotion>(ACTIVE_PROMOTIONS_SQL)
            .bind(SqlxTimestamp::from(now))
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    /// Atomically bump one counter. Returns the number of rows touched so
    /// callers can signal `NotFound` without a prior read.
    pub(crate) async fn track_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
        kind: TrackKind,
    ) -> Result<u64, sqlx::Error> {
        let sql = match kind {
            TrackKind::View => TRACK_VIEW_SQL,
            TrackKind::Click => TRACK_CLICK_SQL,
        };

        let rows_affected = query(sql)
            .bind(promotion.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Promotion {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let tag_kind_raw: String = row.try_get("tag_kind")?;
        let status_raw: String = row.try_get("status")?;

        let tag_kind =
            TagKind::from_str(&tag_kind_raw).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "tag_kind".to_string(),
                source: format!("unknown tag kind {tag_kind_raw:?}").into(),
            })?;

        let status =
            PromotionStatus::from_str(&status_raw).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: format!("unknown status {status_raw:?}").into(),
            })?;

        Ok(Self {
            uuid: PromotionUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
            link_url: row.try_get("link_url")?,
            tag_kind,
            tag_text: row.try_get("tag_text")?,
            tag_color: row.try_get("tag_color")?,
            start_date: row.try_get::<SqlxTimestamp, _>("start_date")?.to_jiff(),
            end_date: row.try_get::<SqlxTimestamp, _>("end_date")?.to_jiff(),
            priority: row.try_get("priority")?,
            status,
            utm_campaign: row.try_get("utm_campaign")?,
            view_count: row.try_get("view_count")?,
            click_count: row.try_get("click_count")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
