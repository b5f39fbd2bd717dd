//! Simulated payment and shipping services for workflow-orchestration demos.
//!
//! Both services validate the incoming order and then consult a
//! [`FaultTable`] keyed on the customer name. A matching rule can:
//! 1. Delay the response
//! 2. Decline the order (a valid business result, not an error)
//! 3. Reject every attempt except each Nth one, to exercise caller retries
//!
//! Retry attempts are counted per customer and transaction by an injected
//! [`AttemptTracker`], so concurrent requests for different transactions
//! never interfere.

pub mod attempts;
pub mod error;
pub mod faults;
pub mod payment;
pub mod shipping;

pub use attempts::{AttemptKey, AttemptTracker};
pub use error::ServiceError;
pub use faults::{FaultBehavior, FaultInjector, FaultRule, FaultTable, Verdict};
pub use payment::{FaultInjectingPaymentService, PaymentOutcome, PaymentResult, PaymentService};
pub use shipping::{FaultInjectingShippingService, ShippingResult, ShippingService};
