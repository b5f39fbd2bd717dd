//! Payment endpoint.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use services::{PaymentOutcome, PaymentService};
use tracing::Instrument;

use crate::error::ApiError;
use crate::routes::{action_id, decode_order};

/// Shared state of the payment service.
pub struct PaymentState<P: PaymentService> {
    pub payment: P,
}

/// POST / — charge an order, or undo a previous charge.
///
/// An undo answers with an empty body; everything else answers with
/// `{"result": bool, "transactionID": int}`.
pub async fn charge<P: PaymentService + 'static>(
    State(state): State<Arc<PaymentState<P>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let action_id = action_id(&headers)?;
    let span = tracing::info_span!("payment", action_id = %action_id);

    let response: Result<Response, ApiError> = async move {
        tracing::info!("payment request");
        let order = decode_order(&body)?;

        match state.payment.process(&action_id, &order).await? {
            PaymentOutcome::Undone => Ok(StatusCode::OK.into_response()),
            PaymentOutcome::Processed(result) => {
                let json =
                    serde_json::to_string(&result).map_err(|e| ApiError::Internal(e.to_string()))?;
                tracing::info!(customer = %order.customer, %json, "payment result");
                Ok(([(CONTENT_TYPE, "application/json")], json).into_response())
            }
        }
    }
    .instrument(span)
    .await;

    response
}
