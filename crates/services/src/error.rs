//! Service error types.

use common::ErrorCode;
use thiserror::Error;

/// Errors a service call can end with. All of them are terminal for the
/// request; retrying is the caller's business.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The order did not name a customer.
    #[error("no customer provided")]
    MissingCustomer,

    /// A fail-until-attempt rule rejected this payment attempt.
    #[error("payment failed")]
    PaymentFailed { attempt: u32 },

    /// A fail-until-attempt rule rejected this shipping attempt.
    #[error("shipping failed")]
    ShippingFailed { attempt: u32 },
}

impl ServiceError {
    /// Envelope code reported to the orchestrator.
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::MissingCustomer
            | ServiceError::PaymentFailed { .. }
            | ServiceError::ShippingFailed { .. } => ErrorCode::Customer,
        }
    }
}
