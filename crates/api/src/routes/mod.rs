//! Route handlers and request helpers shared by both services.

pub mod health;
pub mod metrics;
pub mod payment;
pub mod shipping;

use axum::http::HeaderMap;
use common::{ACTION_ID_HEADER, ActionId, OrderRequest};

use crate::error::ApiError;

/// Reads the action id the per-request log span is keyed on.
///
/// A missing header yields an empty id; a header that is not visible ASCII
/// cannot be logged and fails the request.
pub fn action_id(headers: &HeaderMap) -> Result<ActionId, ApiError> {
    match headers.get(ACTION_ID_HEADER) {
        None => Ok(ActionId::default()),
        Some(value) => value
            .to_str()
            .map(ActionId::from)
            .map_err(|e| ApiError::LoggerInit(format!("unreadable action id: {e}"))),
    }
}

/// Decodes an order from the raw request body.
pub fn decode_order(body: &[u8]) -> Result<OrderRequest, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::MalformedRequest(e.to_string()))
}
