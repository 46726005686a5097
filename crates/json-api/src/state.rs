//! State

use std::sync::Arc;

use pr_maker_app::{
    context::AppContext, domain::promotions::PromotionsService, storage::StorageService,
};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) promotions: Arc<dyn PromotionsService>,
    pub(crate) storage: Arc<dyn StorageService>,
    pub(crate) api_key: String,
}

impl State {
    #[must_use]
    pub(crate) fn new(
        promotions: Arc<dyn PromotionsService>,
        storage: Arc<dyn StorageService>,
        api_key: String,
    ) -> Self {
        Self {
            promotions,
            storage,
            api_key,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, api_key: String) -> Arc<Self> {
        Arc::new(Self::new(app.promotions, app.storage, api_key))
    }
}
