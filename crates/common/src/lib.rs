//! Wire types shared by the payment and shipping services.

pub mod envelope;
pub mod types;

pub use envelope::{
    ACTION_ID_HEADER, ERROR_CODE_HEADER, ERROR_MESSAGE_HEADER, ErrorCode, ErrorEnvelope,
};
pub use types::{ActionId, LineItem, OrderRequest};
