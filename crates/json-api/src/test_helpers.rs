//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use souk_app::{
    auth::{MockAuthService, models::UserUuid},
    context::AppContext,
    domain::{payments::MockPaymentsService, shipping::MockShippingService},
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_shipping_mock() -> MockShippingService {
    let mut shipping = MockShippingService::new();

    shipping.expect_quote().never();

    shipping
}

fn strict_payments_mock() -> MockPaymentsService {
    let mut payments = MockPaymentsService::new();

    payments.expect_initiate().never();
    payments.expect_verify().never();

    payments
}

fn make_state(
    shipping: MockShippingService,
    payments: MockPaymentsService,
    auth: MockAuthService,
) -> Arc<State> {
    Arc::new(State::new(AppContext {
        shipping: Arc::new(shipping),
        payments: Arc::new(payments),
        auth: Arc::new(auth),
    }))
}

pub(crate) fn state_with_shipping(shipping: MockShippingService) -> Arc<State> {
    make_state(shipping, strict_payments_mock(), strict_auth_mock())
}

pub(crate) fn state_with_payments(payments: MockPaymentsService) -> Arc<State> {
    make_state(strict_shipping_mock(), payments, strict_auth_mock())
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    make_state(strict_shipping_mock(), strict_payments_mock(), auth)
}

/// A service exposing `route` with a mocked shipping service. No identity is
/// injected; the rate endpoint is public.
pub(crate) fn shipping_service(shipping: MockShippingService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_shipping(shipping)))
            .push(route),
    )
}

/// A service exposing `route` with a mocked payments service and the test
/// identity pre-authenticated.
pub(crate) fn payments_service(payments: MockPaymentsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_payments(payments)))
            .hoop(inject_user)
            .push(route),
    )
}

/// Same as [`payments_service`] but without an authenticated identity.
pub(crate) fn unauthenticated_payments_service(
    payments: MockPaymentsService,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_payments(payments)))
            .push(route),
    )
}
