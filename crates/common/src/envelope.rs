//! Error envelope understood by the orchestrator.
//!
//! A failed step is reported through two response headers carrying a dotted
//! error code and a human-readable message. The same pair is mirrored in the
//! JSON body for callers that only look at the payload.

use serde::{Deserialize, Serialize};

/// Request header carrying the action id.
pub const ACTION_ID_HEADER: &str = "Direktiv-ActionID";
/// Response header carrying the dotted error code.
pub const ERROR_CODE_HEADER: &str = "Direktiv-ErrorCode";
/// Response header carrying the error message.
pub const ERROR_MESSAGE_HEADER: &str = "Direktiv-ErrorMessage";

/// Error codes reported back to the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "io.direktiv.customer")]
    Customer,
    #[serde(rename = "io.direktiv.data")]
    Data,
    #[serde(rename = "io.direktiv.internal")]
    Internal,
    #[serde(rename = "io.direktiv.logger")]
    Logger,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Customer => "io.direktiv.customer",
            ErrorCode::Data => "io.direktiv.data",
            ErrorCode::Internal => "io.direktiv.internal",
            ErrorCode::Logger => "io.direktiv.logger",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub error_code: ErrorCode,
    pub error_message: String,
}

impl ErrorEnvelope {
    pub fn new(error_code: ErrorCode, error_message: impl Into<String>) -> Self {
        Self {
            error_code,
            error_message: error_message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_dotted_code() {
        let envelope = ErrorEnvelope::new(ErrorCode::Customer, "no customer provided");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["errorCode"], "io.direktiv.customer");
        assert_eq!(json["errorMessage"], "no customer provided");
    }

    #[test]
    fn as_str_matches_serde_name() {
        for code in [
            ErrorCode::Customer,
            ErrorCode::Data,
            ErrorCode::Internal,
            ErrorCode::Logger,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, code.as_str());
        }
    }
}
