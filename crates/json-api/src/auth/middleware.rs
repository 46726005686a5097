//! Auth middleware.

use std::sync::Arc;

use salvo::prelude::*;

use crate::state::State;

pub(crate) const API_KEY_HEADER: &str = "x-api-key";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let Some(key) = extract_api_key(req) else {
        res.render(StatusError::unauthorized().brief("Missing X-Api-Key header"));

        return;
    };

    if key != state.api_key {
        res.render(StatusError::unauthorized().brief("Invalid API key"));

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_api_key(req: &Request) -> Option<&str> {
    let value = req.headers().get(API_KEY_HEADER)?.to_str().ok()?;
    let key = value.trim();

    if key.is_empty() {
        return None;
    }

    Some(key)
}
