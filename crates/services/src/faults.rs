//! Customer-keyed fault injection.

use std::sync::Arc;
use std::time::Duration;

use common::OrderRequest;
use serde::{Deserialize, Serialize};

use crate::attempts::{AttemptKey, AttemptTracker};

/// Customer whose payment is held back before completing.
pub const PATIENT_CUSTOMER: &str = "Johnny Patience";
/// Customer whose payment is always declined.
pub const BROKE_CUSTOMER: &str = "Johnny No-Cash";
/// Customer whose payment only succeeds on every third attempt.
pub const RETRY_CUSTOMER: &str = "Pay Retry";
/// Customer whose shipment is always declined.
pub const UNREACHABLE_CUSTOMER: &str = "Johnny Mars";

/// What happens to a request whose customer matches a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "behavior", rename_all = "snake_case")]
pub enum FaultBehavior {
    /// Hold the response back before continuing.
    Delay { seconds: u64 },
    /// Report `succeeded = false` without failing the request.
    Decline,
    /// Reject every attempt except each `every`-th one. `0` and `1` never reject.
    FailUntilAttempt { every: u32 },
}

/// One entry of a fault table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultRule {
    /// Exact customer name the rule applies to.
    pub customer: String,
    #[serde(flatten)]
    pub behavior: FaultBehavior,
}

impl FaultRule {
    pub fn new(customer: impl Into<String>, behavior: FaultBehavior) -> Self {
        Self {
            customer: customer.into(),
            behavior,
        }
    }

    fn matches(&self, order: &OrderRequest) -> bool {
        self.customer == order.customer
    }
}

/// Fault rules for both services, evaluated in declaration order.
///
/// The default table holds the demo customers used by the order workflow:
///
/// ```json
/// {
///   "payment": [
///     {"customer": "Johnny Patience", "behavior": "delay", "seconds": 120},
///     {"customer": "Johnny No-Cash", "behavior": "decline"},
///     {"customer": "Pay Retry", "behavior": "fail_until_attempt", "every": 3}
///   ],
///   "shipping": [
///     {"customer": "Johnny Mars", "behavior": "decline"}
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultTable {
    #[serde(default)]
    pub payment: Vec<FaultRule>,
    #[serde(default)]
    pub shipping: Vec<FaultRule>,
}

impl FaultTable {
    /// Parses a table from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for FaultTable {
    fn default() -> Self {
        Self {
            payment: vec![
                FaultRule::new(PATIENT_CUSTOMER, FaultBehavior::Delay { seconds: 120 }),
                FaultRule::new(BROKE_CUSTOMER, FaultBehavior::Decline),
                FaultRule::new(RETRY_CUSTOMER, FaultBehavior::FailUntilAttempt { every: 3 }),
            ],
            shipping: vec![FaultRule::new(UNREACHABLE_CUSTOMER, FaultBehavior::Decline)],
        }
    }
}

/// Result of running an order through the fault rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Continue processing; `succeeded` is false if a rule declined the order.
    Proceed { succeeded: bool },
    /// A retry rule rejected this attempt.
    Rejected { attempt: u32 },
}

/// Applies one service's fault rules to incoming orders.
#[derive(Debug, Clone)]
pub struct FaultInjector {
    rules: Arc<Vec<FaultRule>>,
    attempts: AttemptTracker,
}

impl FaultInjector {
    pub fn new(rules: Vec<FaultRule>, attempts: AttemptTracker) -> Self {
        Self {
            rules: Arc::new(rules),
            attempts,
        }
    }

    /// Returns the tracker used by retry rules.
    pub fn attempts(&self) -> &AttemptTracker {
        &self.attempts
    }

    /// Runs every rule matching the order's customer.
    ///
    /// Delays suspend only the calling task. A rejection stops evaluation;
    /// rules after it are not applied.
    pub async fn evaluate(&self, order: &OrderRequest) -> Verdict {
        let mut succeeded = true;

        for rule in self.rules.iter().filter(|rule| rule.matches(order)) {
            match rule.behavior {
                FaultBehavior::Delay { seconds } => {
                    tracing::info!(seconds, "holding response back");
                    tokio::time::sleep(Duration::from_secs(seconds)).await;
                }
                FaultBehavior::Decline => {
                    succeeded = false;
                }
                FaultBehavior::FailUntilAttempt { every } => {
                    let attempt = self.attempts.record(AttemptKey::for_order(order), every);
                    if attempt < every {
                        tracing::info!(attempt, every, "rejecting attempt");
                        return Verdict::Rejected { attempt };
                    }
                }
            }
        }

        Verdict::Proceed { succeeded }
    }
}
