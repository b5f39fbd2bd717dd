//! Payment service trait and fault-injecting implementation.

use async_trait::async_trait;
use common::{ActionId, OrderRequest};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::attempts::AttemptTracker;
use crate::error::ServiceError;
use crate::faults::{FaultInjector, FaultRule, FaultTable, Verdict};

/// Transaction ids are drawn from `0..TRANSACTION_ID_RANGE`.
pub const TRANSACTION_ID_RANGE: u32 = 100;

/// Result of a processed payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    /// Whether the payment went through.
    #[serde(rename = "result")]
    pub succeeded: bool,
    /// Transaction id assigned by the payment provider.
    #[serde(rename = "transactionID")]
    pub transaction_id: u32,
}

/// What a payment call produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The orchestrator compensated a previous payment; there is no result.
    Undone,
    /// The payment was processed, successfully or not.
    Processed(PaymentResult),
}

/// Trait for payment processing.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Processes the payment for an order, or undoes it if the order asks to.
    async fn process(
        &self,
        action_id: &ActionId,
        order: &OrderRequest,
    ) -> Result<PaymentOutcome, ServiceError>;
}

/// Payment service whose behavior is driven by a fault table.
#[derive(Debug, Clone)]
pub struct FaultInjectingPaymentService {
    faults: FaultInjector,
}

impl FaultInjectingPaymentService {
    /// Creates a payment service applying the given rules.
    pub fn new(rules: Vec<FaultRule>, attempts: AttemptTracker) -> Self {
        Self {
            faults: FaultInjector::new(rules, attempts),
        }
    }

    /// Creates a payment service from the payment section of a table.
    pub fn from_table(table: &FaultTable, attempts: AttemptTracker) -> Self {
        Self::new(table.payment.clone(), attempts)
    }
}

impl Default for FaultInjectingPaymentService {
    fn default() -> Self {
        Self::from_table(&FaultTable::default(), AttemptTracker::new())
    }
}

#[async_trait]
impl PaymentService for FaultInjectingPaymentService {
    #[tracing::instrument(
        skip_all,
        fields(action_id = %action_id, customer = %order.customer, transaction = %order.transaction_ref)
    )]
    async fn process(
        &self,
        action_id: &ActionId,
        order: &OrderRequest,
    ) -> Result<PaymentOutcome, ServiceError> {
        metrics::counter!("payment_requests_total").increment(1);

        if order.is_undo() {
            tracing::info!("undo payment");
            return Ok(PaymentOutcome::Undone);
        }

        tracing::info!("running payment");

        if !order.has_customer() {
            return Err(ServiceError::MissingCustomer);
        }

        let succeeded = match self.faults.evaluate(order).await {
            Verdict::Proceed { succeeded } => succeeded,
            Verdict::Rejected { attempt } => {
                metrics::counter!("payment_rejected_total").increment(1);
                tracing::warn!(attempt, "payment attempt rejected");
                return Err(ServiceError::PaymentFailed { attempt });
            }
        };

        if !succeeded {
            metrics::counter!("payment_declined_total").increment(1);
        }

        let result = PaymentResult {
            succeeded,
            transaction_id: rand::thread_rng().gen_range(0..TRANSACTION_ID_RANGE),
        };
        tracing::info!(
            succeeded,
            transaction_id = result.transaction_id,
            "payment processed"
        );

        Ok(PaymentOutcome::Processed(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faults::{BROKE_CUSTOMER, RETRY_CUSTOMER};

    fn processed(outcome: PaymentOutcome) -> PaymentResult {
        match outcome {
            PaymentOutcome::Processed(result) => result,
            PaymentOutcome::Undone => panic!("expected a processed payment"),
        }
    }

    #[tokio::test]
    async fn test_regular_customer_succeeds() {
        let service = FaultInjectingPaymentService::default();
        let order = OrderRequest::new("Alice", "t1").with_item(1, 2);

        let result = processed(service.process(&ActionId::from("a1"), &order).await.unwrap());
        assert!(result.succeeded);
        assert!(result.transaction_id < TRANSACTION_ID_RANGE);
    }

    #[tokio::test]
    async fn test_missing_customer() {
        let service = FaultInjectingPaymentService::default();
        let result = service
            .process(&ActionId::default(), &OrderRequest::default())
            .await;
        assert_eq!(result, Err(ServiceError::MissingCustomer));
    }

    #[tokio::test]
    async fn test_undo_short_circuits_before_customer_check() {
        let service = FaultInjectingPaymentService::default();

        let empty = OrderRequest::default().undo();
        assert_eq!(
            service.process(&ActionId::default(), &empty).await,
            Ok(PaymentOutcome::Undone)
        );

        let retry = OrderRequest::new(RETRY_CUSTOMER, "t1").undo();
        assert_eq!(
            service.process(&ActionId::default(), &retry).await,
            Ok(PaymentOutcome::Undone)
        );
    }

    #[tokio::test]
    async fn test_declined_customer_is_not_an_error() {
        let service = FaultInjectingPaymentService::default();
        let order = OrderRequest::new(BROKE_CUSTOMER, "t1");

        let result = processed(service.process(&ActionId::default(), &order).await.unwrap());
        assert!(!result.succeeded);
    }

    #[tokio::test]
    async fn test_retry_customer_fails_twice_then_succeeds() {
        let service = FaultInjectingPaymentService::default();
        let order = OrderRequest::new(RETRY_CUSTOMER, "t1");
        let action_id = ActionId::default();

        for call in 1..=9u32 {
            let result = service.process(&action_id, &order).await;
            if call % 3 == 0 {
                assert!(processed(result.unwrap()).succeeded, "call {call}");
            } else {
                assert_eq!(
                    result,
                    Err(ServiceError::PaymentFailed {
                        attempt: (call - 1) % 3 + 1
                    }),
                    "call {call}"
                );
            }
        }
    }

    #[tokio::test]
    async fn test_transaction_ids_stay_in_range() {
        let service = FaultInjectingPaymentService::default();
        let order = OrderRequest::new("Alice", "t1");

        for _ in 0..500 {
            let result = processed(service.process(&ActionId::default(), &order).await.unwrap());
            assert!(result.transaction_id < TRANSACTION_ID_RANGE);
        }
    }

    #[test]
    fn test_result_wire_format() {
        let json = serde_json::to_value(PaymentResult {
            succeeded: true,
            transaction_id: 42,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"result": true, "transactionID": 42}));
    }
}
