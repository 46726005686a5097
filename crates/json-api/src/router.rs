//! App Router

use salvo::Router;

use crate::{auth, healthcheck, pr, upload};

pub(crate) fn app_router() -> Router {
    Router::with_path("api")
        .push(Router::with_path("health").get(healthcheck::handler))
        // End users hit the redirect from the banner; it carries no API key.
        .push(
            Router::with_path("pr/{uuid}/redirect").get(pr::handlers::redirect::handler),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("pr")
                        .get(pr::handlers::index::handler)
                        .post(pr::handlers::create::handler)
                        // `active` must register ahead of the `{uuid}` capture.
                        .push(Router::with_path("active").get(pr::handlers::active::handler))
                        .push(
                            Router::with_path("{uuid}")
                                .get(pr::handlers::get::handler)
                                .put(pr::handlers::update::handler)
                                .delete(pr::handlers::delete::handler)
                                .push(
                                    Router::with_path("duplicate")
                                        .post(pr::handlers::duplicate::handler),
                                )
                                .push(
                                    Router::with_path("stats").get(pr::handlers::stats::handler),
                                )
                                .push(
                                    Router::with_path("track").post(pr::handlers::track::handler),
                                ),
                        ),
                )
                .push(Router::with_path("upload/image").post(upload::image::handler)),
        )
}
