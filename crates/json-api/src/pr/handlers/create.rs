//! Create PR Bubble Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    pr::{errors::into_status_error, handlers::get::PromotionResponse, requests::CreatePromotionRequest},
    state::State,
};

/// Create PR Bubble Handler
#[endpoint(
    tags("pr"),
    summary = "Create PR Bubble",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "PR bubble created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePromotionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let new_promotion = json.into_inner().into_new_promotion()?;

    let created = state
        .promotions
        .create_promotion(new_promotion)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/pr/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use pr_maker_app::domain::promotions::{
        MockPromotionsService, PromotionsServiceError,
        models::{PromotionStatus, PromotionUuid, TagKind},
    };

    use crate::test_helpers::{make_promotion, promotions_service};

    use super::*;

    fn make_service(promotions: MockPromotionsService) -> Service {
        promotions_service(promotions, Router::with_path("pr").post(handler))
    }

    fn valid_body() -> serde_json::Value {
        serde_json::json!({
            "title": "Launch",
            "description": "New product launch",
            "image_url": "https://cdn.example.com/a.png",
            "link_url": "https://shop.example.com",
            "start_date": "2024-06-01T00:00:00Z",
            "end_date": "2024-06-30T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_create_returns_201_with_body() -> TestResult {
        let uuid = PromotionUuid::new();

        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_create_promotion()
            .once()
            .withf(|new| {
                new.title == "Launch"
                    && new.tag_kind == TagKind::Gizmart
                    && new.tag_text == "GIZMART"
                    && new.tag_color == "#FF1BE8"
                    && new.status == PromotionStatus::Draft
            })
            .return_once(move |_| Ok(make_promotion(uuid)));

        promotions.expect_update_promotion().never();
        promotions.expect_get_promotion().never();

        let mut res = TestClient::post("http://example.com/pr")
            .json(&valid_body())
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let response: PromotionResponse = res.take_json().await?;

        assert_eq!(response.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_validation_error_returns_400() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_create_promotion()
            .once()
            .return_once(|_| {
                Err(PromotionsServiceError::Validation {
                    field: "title",
                    message: "title must be 60 characters or fewer",
                })
            });

        let res = TestClient::post("http://example.com/pr")
            .json(&valid_body())
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_bad_date_returns_400_without_service_call() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions.expect_create_promotion().never();

        let mut body = valid_body();
        body["start_date"] = serde_json::json!("tomorrow");

        let res = TestClient::post("http://example.com/pr")
            .json(&body)
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_missing_title_returns_400() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions.expect_create_promotion().never();

        let mut body = valid_body();
        if let Some(map) = body.as_object_mut() {
            map.remove("title");
        }

        let res = TestClient::post("http://example.com/pr")
            .json(&body)
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
