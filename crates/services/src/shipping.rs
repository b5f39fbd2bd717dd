//! Shipping service trait and fault-injecting implementation.

use async_trait::async_trait;
use common::{ActionId, OrderRequest};
use serde::{Deserialize, Serialize};

use crate::attempts::AttemptTracker;
use crate::error::ServiceError;
use crate::faults::{FaultInjector, FaultRule, FaultTable, Verdict};

/// Result of a shipping request, serialized as a bare boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShippingResult {
    pub succeeded: bool,
}

/// Trait for shipping operations.
#[async_trait]
pub trait ShippingService: Send + Sync {
    /// Ships an order.
    async fn ship(
        &self,
        action_id: &ActionId,
        order: &OrderRequest,
    ) -> Result<ShippingResult, ServiceError>;
}

/// Shipping service whose behavior is driven by a fault table.
#[derive(Debug, Clone)]
pub struct FaultInjectingShippingService {
    faults: FaultInjector,
}

impl FaultInjectingShippingService {
    pub fn new(rules: Vec<FaultRule>, attempts: AttemptTracker) -> Self {
        Self {
            faults: FaultInjector::new(rules, attempts),
        }
    }

    pub fn from_table(table: &FaultTable, attempts: AttemptTracker) -> Self {
        Self::new(table.shipping.clone(), attempts)
    }
}

impl Default for FaultInjectingShippingService {
    fn default() -> Self {
        Self::from_table(&FaultTable::default(), AttemptTracker::new())
    }
}

#[async_trait]
impl ShippingService for FaultInjectingShippingService {
    #[tracing::instrument(
        skip_all,
        fields(action_id = %action_id, customer = %order.customer)
    )]
    async fn ship(
        &self,
        action_id: &ActionId,
        order: &OrderRequest,
    ) -> Result<ShippingResult, ServiceError> {
        metrics::counter!("shipping_requests_total").increment(1);
        tracing::info!("executing shipping");

        if !order.has_customer() {
            return Err(ServiceError::MissingCustomer);
        }

        let succeeded = match self.faults.evaluate(order).await {
            Verdict::Proceed { succeeded } => succeeded,
            Verdict::Rejected { attempt } => {
                tracing::warn!(attempt, "shipping attempt rejected");
                return Err(ServiceError::ShippingFailed { attempt });
            }
        };

        if !succeeded {
            metrics::counter!("shipping_declined_total").increment(1);
        }
        tracing::info!(succeeded, "shipping processed");

        Ok(ShippingResult { succeeded })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faults::{FaultBehavior, UNREACHABLE_CUSTOMER};

    #[tokio::test]
    async fn test_ships_to_regular_customers() {
        let service = FaultInjectingShippingService::default();

        for customer in ["Alice", "Johnny No-Cash", "Pay Retry", "johnny mars"] {
            let result = service
                .ship(&ActionId::default(), &OrderRequest::new(customer, "t1"))
                .await
                .unwrap();
            assert!(result.succeeded, "{customer}");
        }
    }

    #[tokio::test]
    async fn test_unreachable_customer_is_declined() {
        let service = FaultInjectingShippingService::default();
        let result = service
            .ship(
                &ActionId::from("a1"),
                &OrderRequest::new(UNREACHABLE_CUSTOMER, "t1"),
            )
            .await
            .unwrap();
        assert!(!result.succeeded);
    }

    #[tokio::test]
    async fn test_missing_customer() {
        let service = FaultInjectingShippingService::default();
        let result = service
            .ship(&ActionId::default(), &OrderRequest::default())
            .await;
        assert_eq!(result, Err(ServiceError::MissingCustomer));
    }

    #[tokio::test]
    async fn test_configured_retry_rule_rejects_with_shipping_error() {
        let service = FaultInjectingShippingService::new(
            vec![FaultRule::new(
                "Slow Courier",
                FaultBehavior::FailUntilAttempt { every: 2 },
            )],
            AttemptTracker::new(),
        );
        let order = OrderRequest::new("Slow Courier", "t1");

        assert_eq!(
            service.ship(&ActionId::default(), &order).await,
            Err(ServiceError::ShippingFailed { attempt: 1 })
        );
        assert_eq!(
            service.ship(&ActionId::default(), &order).await,
            Ok(ShippingResult { succeeded: true })
        );
    }

    #[test]
    fn test_result_is_bare_boolean() {
        let json = serde_json::to_string(&ShippingResult { succeeded: false }).unwrap();
        assert_eq!(json, "false");
    }
}
