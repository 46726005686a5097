//! Track PR Bubble Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    pr::{errors::into_status_error, requests::TrackPromotionRequest},
    state::State,
};

/// Track PR Bubble Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TrackResponse {
    /// Whether the event was recorded
    pub success: bool,
}

/// Track PR Bubble Handler
///
/// Records a view or click event against the PR bubble.
#[endpoint(
    tags("pr"),
    summary = "Track PR Bubble Event",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Event recorded"),
        (status_code = StatusCode::NOT_FOUND, description = "PR bubble not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<TrackPromotionRequest>,
    depot: &mut Depot,
) -> Result<Json<TrackResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .promotions
        .track_promotion(uuid.into_inner().into(), json.into_inner().kind.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(TrackResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use pr_maker_app::domain::promotions::{
        MockPromotionsService, PromotionsServiceError,
        models::{PromotionUuid, TrackKind},
    };

    use crate::test_helpers::promotions_service;

    use super::*;

    fn make_service(promotions: MockPromotionsService) -> Service {
        promotions_service(promotions, Router::with_path("pr/{uuid}/track").post(handler))
    }

    #[tokio::test]
    async fn test_track_view_returns_success() -> TestResult {
        let uuid = PromotionUuid::new();

        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_track_promotion()
            .once()
            .withf(move |u, kind| *u == uuid && *kind == TrackKind::View)
            .return_once(|_, _| Ok(()));

        promotions.expect_promotion_stats().never();

        let response: TrackResponse =
            TestClient::post(format!("http://example.com/pr/{uuid}/track"))
                .json(&serde_json::json!({"type": "view"}))
                .send(&make_service(promotions))
                .await
                .take_json()
                .await?;

        assert!(response.success);

        Ok(())
    }

    #[tokio::test]
    async fn test_track_click_is_forwarded() -> TestResult {
        let uuid = PromotionUuid::new();

        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_track_promotion()
            .once()
            .withf(move |_, kind| *kind == TrackKind::Click)
            .return_once(|_, _| Ok(()));

        let res = TestClient::post(format!("http://example.com/pr/{uuid}/track"))
            .json(&serde_json::json!({"type": "click"}))
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_track_unknown_kind_returns_400_without_service_call() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions.expect_track_promotion().never();

        let res = TestClient::post(format!(
            "http://example.com/pr/{}/track",
            PromotionUuid::new()
        ))
        .json(&serde_json::json!({"type": "hover"}))
        .send(&make_service(promotions))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_track_unknown_uuid_returns_404() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_track_promotion()
            .once()
            .return_once(|_, _| Err(PromotionsServiceError::NotFound));

        let res = TestClient::post(format!(
            "http://example.com/pr/{}/track",
            PromotionUuid::new()
        ))
        .json(&serde_json::json!({"type": "view"}))
        .send(&make_service(promotions))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
