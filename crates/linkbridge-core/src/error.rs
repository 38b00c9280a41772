// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error taxonomy for the bridge.
//
// Every failure that can cross the channel boundary is one of the variants
// below.  The wire representation is a (code, message) pair; `code()` derives
// the string code that callers switch on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for all bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A required call argument is missing (or blank, for push tokens).
    /// Reported synchronously, before any native call.
    #[error("{0}")]
    InvalidArgument(String),

    /// An operation that needs a live SDK instance ran before `init` succeeded.
    #[error("SDK not initialized")]
    NotInitialized,

    /// The method name is not part of the bridge surface.
    #[error("method {0} is not implemented")]
    NotImplemented(String),

    /// The native SDK completed the call but reported failure.
    #[error("{message}")]
    NativeFailure {
        /// Error-code prefix of the failing operation (e.g. `CAPTURE_PAYMENT`).
        operation: &'static str,
        message: String,
    },

    /// The native call was torn down mid-flight (a panic inside the SDK or
    /// the conversion layer).
    #[error("{message}")]
    NativeException {
        operation: &'static str,
        message: String,
    },
}

impl BridgeError {
    /// String code callers receive on the wire.
    ///
    /// Native failures and exceptions encode the operation name so that a
    /// caller can tell a failed `signup` from a failed `capturePayment`
    /// without parsing the message.
    pub fn code(&self) -> String {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT".to_string(),
            Self::NotInitialized => "NOT_INITIALIZED".to_string(),
            Self::NotImplemented(_) => "NOT_IMPLEMENTED".to_string(),
            Self::NativeFailure { operation, .. } => format!("{operation}_FAILED"),
            Self::NativeException { operation, .. } => format!("{operation}_EXCEPTION"),
        }
    }
}

/// Wire-level failure: string code plus human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFailure {
    pub code: String,
    pub message: String,
}

impl CallFailure {
    /// Failure reported when the channel itself shut down before replying.
    /// Host-side only — it never originates from the dispatcher.
    pub fn channel_closed() -> Self {
        Self {
            code: "CHANNEL_CLOSED".to_string(),
            message: "method channel closed before a result was delivered".to_string(),
        }
    }
}

impl From<BridgeError> for CallFailure {
    fn from(err: BridgeError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for CallFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Exactly one of these is delivered per call request.
pub type CallResult = std::result::Result<serde_json::Value, CallFailure>;

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_operation_prefixes() {
        let failed = BridgeError::NativeFailure {
            operation: "CAPTURE_PAYMENT",
            message: "declined".into(),
        };
        assert_eq!(failed.code(), "CAPTURE_PAYMENT_FAILED");

        let exception = BridgeError::NativeException {
            operation: "SIGNUP",
            message: "boom".into(),
        };
        assert_eq!(exception.code(), "SIGNUP_EXCEPTION");
    }

    #[test]
    fn fixed_codes() {
        assert_eq!(
            BridgeError::InvalidArgument("Token is required".into()).code(),
            "INVALID_ARGUMENT"
        );
        assert_eq!(BridgeError::NotInitialized.code(), "NOT_INITIALIZED");
        assert_eq!(
            BridgeError::NotImplemented("frobnicate".into()).code(),
            "NOT_IMPLEMENTED"
        );
    }

    #[test]
    fn failure_carries_code_and_message() {
        let failure = CallFailure::from(BridgeError::InvalidArgument("Token is required".into()));
        assert_eq!(failure.code, "INVALID_ARGUMENT");
        assert_eq!(failure.message, "Token is required");
    }
}
