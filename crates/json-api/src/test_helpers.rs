//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use pr_maker_app::{
    domain::promotions::{
        MockPromotionsService,
        models::{Promotion, PromotionStatus, PromotionUuid, TagKind},
    },
    storage::MockStorageService,
};

use crate::state::State;

pub(crate) const TEST_API_KEY: &str = "test-api-key";

pub(crate) fn make_promotion(uuid: PromotionUuid) -> Promotion {
    Promotion {
        uuid,
        title: "Summer Sale".to_string(),
        description: "Everything must go".to_string(),
        image_url: "https://cdn.example.com/banner.png".to_string(),
        link_url: "https://shop.example.com/offer".to_string(),
        tag_kind: TagKind::Gizmart,
        tag_text: "GIZMART".to_string(),
        tag_color: "#FF1BE8".to_string(),
        start_date: Timestamp::UNIX_EPOCH,
        end_date: Timestamp::UNIX_EPOCH + jiff::Span::new().hours(1),
        priority: None,
        status: PromotionStatus::Draft,
        utm_campaign: None,
        view_count: 0,
        click_count: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

fn strict_storage_mock() -> MockStorageService {
    let mut storage = MockStorageService::new();

    storage.expect_upload_image().never();

    storage
}

fn strict_promotions_mock() -> MockPromotionsService {
    let mut promotions = MockPromotionsService::new();

    promotions.expect_list_promotions().never();
    promotions.expect_get_promotion().never();
    promotions.expect_create_promotion().never();
    promotions.expect_update_promotion().never();
    promotions.expect_delete_promotion().never();
    promotions.expect_duplicate_promotion().never();
    promotions.expect_active_promotions().never();
    promotions.expect_track_promotion().never();
    promotions.expect_promotion_stats().never();
    promotions.expect_redirect_promotion().never();

    promotions
}

pub(crate) fn state_with_promotions(promotions: MockPromotionsService) -> Arc<State> {
    Arc::new(State::new(
        Arc::new(promotions),
        Arc::new(strict_storage_mock()),
        TEST_API_KEY.to_string(),
    ))
}

pub(crate) fn state_with_storage(storage: MockStorageService) -> Arc<State> {
    Arc::new(State::new(
        Arc::new(strict_promotions_mock()),
        Arc::new(storage),
        TEST_API_KEY.to_string(),
    ))
}

pub(crate) fn strict_state() -> Arc<State> {
    Arc::new(State::new(
        Arc::new(strict_promotions_mock()),
        Arc::new(strict_storage_mock()),
        TEST_API_KEY.to_string(),
    ))
}

pub(crate) fn promotions_service(promotions: MockPromotionsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_promotions(promotions)))
            .push(route),
    )
}

pub(crate) fn storage_service(storage: MockStorageService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_storage(storage)))
            .push(route),
    )
}
