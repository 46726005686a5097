//! Redirect PR Bubble Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, pr::errors::into_status_error, state::State};

/// Redirect PR Bubble Handler
///
/// Records a click and redirects to the UTM-tagged destination. This
/// endpoint is unauthenticated; end users follow it from the banner.
#[endpoint(
    tags("pr"),
    summary = "Redirect to PR Bubble Destination",
    responses(
        (status_code = StatusCode::FOUND, description = "Redirect to the tagged destination"),
        (status_code = StatusCode::NOT_FOUND, description = "PR bubble not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid redirect target"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let target = state
        .promotions
        .redirect_promotion(uuid.into_inner().into(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    res.render(Redirect::found(target));

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::{http::header::LOCATION, test::TestClient};
    use testresult::TestResult;

    use pr_maker_app::domain::promotions::{
        MockPromotionsService, PromotionsServiceError, models::PromotionUuid,
    };

    use crate::test_helpers::promotions_service;

    use super::*;

    fn make_service(promotions: MockPromotionsService) -> Service {
        promotions_service(
            promotions,
            Router::with_path("pr/{uuid}/redirect").get(handler),
        )
    }

    #[tokio::test]
    async fn test_redirect_returns_302_with_location() -> TestResult {
        let uuid = PromotionUuid::new();

        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_redirect_promotion()
            .once()
            .withf(move |u, _| *u == uuid)
            .return_once(|_, _| {
                Ok(
                    "https://shop.example.com/offer?utm_source=line&utm_medium=pr_bubble"
                        .to_string(),
                )
            });

        promotions.expect_track_promotion().never();

        let res = TestClient::get(format!("http://example.com/pr/{uuid}/redirect"))
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FOUND));

        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        assert!(location.contains("utm_medium=pr_bubble"), "got {location}");

        Ok(())
    }

    #[tokio::test]
    async fn test_redirect_unknown_uuid_returns_404() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_redirect_promotion()
            .once()
            .return_once(|_, _| Err(PromotionsServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/pr/{}/redirect",
            PromotionUuid::new()
        ))
        .send(&make_service(promotions))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_redirect_unsafe_target_returns_400() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_redirect_promotion()
            .once()
            .return_once(|_, _| Err(PromotionsServiceError::InvalidRedirectTarget));

        let res = TestClient::get(format!(
            "http://example.com/pr/{}/redirect",
            PromotionUuid::new()
        ))
        .send(&make_service(promotions))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
