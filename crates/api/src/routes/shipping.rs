//! Shipping endpoint.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use services::{ShippingResult, ShippingService};
use tracing::Instrument;

use crate::error::ApiError;
use crate::routes::{action_id, decode_order};

/// Shared state of the shipping service.
pub struct ShippingState<S: ShippingService> {
    pub shipping: S,
}

/// POST / — ship an order. Answers with a bare `true` or `false`.
pub async fn ship<S: ShippingService + 'static>(
    State(state): State<Arc<ShippingState<S>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ShippingResult>, ApiError> {
    let action_id = action_id(&headers)?;
    let span = tracing::info_span!("shipping", action_id = %action_id);

    let response: Result<Json<ShippingResult>, ApiError> = async move {
        tracing::info!("shipping request");
        let order = decode_order(&body)?;
        let result = state.shipping.ship(&action_id, &order).await?;
        tracing::info!(customer = %order.customer, succeeded = result.succeeded, "shipping result");
        Ok(Json(result))
    }
    .instrument(span)
    .await;

    response
}
