use serde::{Deserialize, Deserializer, Serialize};

/// Correlation identifier supplied by the orchestrator for one workflow step.
///
/// Every log line emitted while serving a request carries this value so the
/// orchestrator can attribute output to the step that triggered it. An absent
/// header yields an empty id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(String);

impl ActionId {
    /// Creates an action id from its header value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the orchestrator did not supply an id.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Decodes `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One ordered product line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(
        rename = "productID",
        alias = "productId",
        alias = "ProductID",
        alias = "productid",
        default,
        deserialize_with = "null_as_default"
    )]
    pub product_id: i64,
    #[serde(alias = "Quantity", default, deserialize_with = "null_as_default")]
    pub quantity: i64,
}

/// Order payload posted by the orchestrator to both services.
///
/// Every field is optional on the wire and falls back to its zero value when
/// missing or `null`, so `{"customer":""}`, `{"customer":null}` and `{}` all
/// decode and are rejected later by the customer check rather than by the
/// decoder. Capitalized field names are accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(alias = "Customer", default, deserialize_with = "null_as_default")]
    pub customer: String,
    #[serde(
        rename = "transaction",
        alias = "Transaction",
        default,
        deserialize_with = "null_as_default"
    )]
    pub transaction_ref: String,
    #[serde(
        rename = "order",
        alias = "Order",
        default,
        deserialize_with = "null_as_default"
    )]
    pub line_items: Vec<LineItem>,
    #[serde(alias = "Action", default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl OrderRequest {
    /// Action value requesting compensation of a previous call.
    pub const UNDO: &'static str = "undo";

    /// Creates a request for the given customer and transaction reference.
    pub fn new(customer: impl Into<String>, transaction_ref: impl Into<String>) -> Self {
        Self {
            customer: customer.into(),
            transaction_ref: transaction_ref.into(),
            ..Self::default()
        }
    }

    /// Appends a line item.
    pub fn with_item(mut self, product_id: i64, quantity: i64) -> Self {
        self.line_items.push(LineItem {
            product_id,
            quantity,
        });
        self
    }

    /// Marks the request as an undo.
    pub fn undo(mut self) -> Self {
        self.action = Some(Self::UNDO.to_string());
        self
    }

    /// Returns true if the orchestrator is compensating this step.
    pub fn is_undo(&self) -> bool {
        self.action.as_deref() == Some(Self::UNDO)
    }

    /// Returns true if a customer name was supplied.
    pub fn has_customer(&self) -> bool {
        !self.customer.is_empty()
    }
}
