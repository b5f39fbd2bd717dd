//! HTTP front ends for the simulated payment and shipping services.
//!
//! Each service runs as its own process and answers `POST /` with the
//! orchestrator's calling convention, plus `/health` and a Prometheus
//! `/metrics` endpoint.

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod server;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use services::{
    AttemptTracker, FaultInjectingPaymentService, FaultInjectingShippingService, FaultTable,
    PaymentService, ShippingService,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::payment::PaymentState;
use routes::shipping::ShippingState;

/// Creates the payment router.
pub fn create_payment_app<P: PaymentService + 'static>(
    state: Arc<PaymentState<P>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let app = Router::new()
        .route("/", post(routes::payment::charge::<P>))
        .with_state(state);

    with_service_routes(app, "payment", metrics_handle)
}

/// Creates the shipping router.
pub fn create_shipping_app<S: ShippingService + 'static>(
    state: Arc<ShippingState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let app = Router::new()
        .route("/", post(routes::shipping::ship::<S>))
        .with_state(state);

    with_service_routes(app, "shipping", metrics_handle)
}

/// Creates payment state backed by the fault-injecting service.
pub fn create_payment_state(table: &FaultTable) -> Arc<PaymentState<FaultInjectingPaymentService>> {
    Arc::new(PaymentState {
        payment: FaultInjectingPaymentService::from_table(table, AttemptTracker::new()),
    })
}

/// Creates shipping state backed by the fault-injecting service.
pub fn create_shipping_state(
    table: &FaultTable,
) -> Arc<ShippingState<FaultInjectingShippingService>> {
    Arc::new(ShippingState {
        shipping: FaultInjectingShippingService::from_table(table, AttemptTracker::new()),
    })
}

fn with_service_routes(
    app: Router,
    service: &'static str,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::scrape))
        .with_state(metrics_handle);

    app.route("/health", get(move || routes::health::check(service)))
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
