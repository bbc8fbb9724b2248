//! App Router

use salvo::Router;

use crate::{auth, healthcheck, payments, shipping};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("shipping")
                .push(Router::with_path("rate").post(shipping::handlers::rate::handler)),
        )
        .push(
            Router::new().hoop(auth::middleware::handler).push(
                Router::with_path("payments")
                    .push(Router::with_path("initiate").post(payments::handlers::initiate::handler))
                    .push(Router::with_path("verify").post(payments::handlers::verify::handler)),
            ),
        )
}
