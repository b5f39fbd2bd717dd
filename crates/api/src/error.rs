//! API error types rendered as orchestrator error envelopes.

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use common::{ERROR_CODE_HEADER, ERROR_MESSAGE_HEADER, ErrorCode, ErrorEnvelope};
use services::ServiceError;

/// API-level error type that maps to an error envelope.
#[derive(Debug)]
pub enum ApiError {
    /// The per-request logger could not be set up from the action id.
    LoggerInit(String),
    /// The request body is not a valid order.
    MalformedRequest(String),
    /// The service refused the order.
    Service(ServiceError),
    /// The response could not be encoded.
    Internal(String),
}

impl ApiError {
    /// Envelope code reported to the orchestrator.
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::LoggerInit(_) => ErrorCode::Logger,
            ApiError::MalformedRequest(_) => ErrorCode::Data,
            ApiError::Service(err) => err.code(),
            ApiError::Internal(_) => ErrorCode::Internal,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::LoggerInit(_) | ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::MissingCustomer) => StatusCode::BAD_REQUEST,
            ApiError::Service(
                ServiceError::PaymentFailed { .. } | ServiceError::ShippingFailed { .. },
            ) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::LoggerInit(msg) | ApiError::MalformedRequest(msg) | ApiError::Internal(msg) => {
                msg.clone()
            }
            ApiError::Service(err) => err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let envelope = ErrorEnvelope::new(self.code(), self.message());

        match &self {
            ApiError::Internal(_) | ApiError::LoggerInit(_) => {
                tracing::error!(code = %envelope.error_code, error = %envelope.error_message, "request failed");
            }
            _ => {
                tracing::warn!(code = %envelope.error_code, error = %envelope.error_message, "request rejected");
            }
        }
        metrics::counter!("error_responses_total", "code" => envelope.error_code.as_str())
            .increment(1);

        let headers = [
            (
                ERROR_CODE_HEADER,
                HeaderValue::from_static(envelope.error_code.as_str()),
            ),
            (
                ERROR_MESSAGE_HEADER,
                header_safe(&envelope.error_message),
            ),
        ];

        (status, headers, axum::Json(envelope)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

/// Header values only carry visible ASCII; anything else is replaced.
fn header_safe(message: &str) -> HeaderValue {
    let sanitized: String = message
        .chars()
        .map(|c| if c == ' ' || c.is_ascii_graphic() { c } else { '?' })
        .collect();
    HeaderValue::from_str(&sanitized).unwrap_or_else(|_| HeaderValue::from_static("?"))
}
