//! Error types.
//!
//! Remote and transport failures are caught at the connector boundary and
//! returned as [`BridgeError`] values; nothing in this crate throws past
//! that boundary under declared failure conditions.
//!
//! # Example
//!
//! ```
//! use pimcore_client::BridgeError;
//!
//! let error = BridgeError::validation("no id provided");
//! assert_eq!(error.to_string(), "no id provided");
//! assert!(error.is_validation());
//! ```

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Failure taxonomy for bridge operations.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeError {
    /// A required field was missing; no request was sent.
    #[error("{message}")]
    Validation {
        /// What was missing.
        message: String,
    },

    /// The server replied but flagged the operation as failed.
    #[error("{message}")]
    Application {
        /// Server-provided message, or a fallback when the body had none.
        message: String,
        /// The full response body, preserved for diagnostics.
        payload: Value,
    },

    /// The request never produced a usable server reply: network fault,
    /// non-2xx status, or a body that was not valid JSON.
    #[error("{message}")]
    Transport {
        /// Message resolved per [`FaultMessageSource`](crate::FaultMessageSource).
        message: String,
        /// Best available diagnostic: the error body when present, else the
        /// raw text or fault string.
        diagnostic: Value,
    },

    /// The client could not be built from its configuration.
    #[error("invalid configuration: {message}")]
    Config {
        /// What was wrong.
        message: String,
    },
}

impl BridgeError {
    /// Shorthand for a [`BridgeError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// The human-readable message of any variant.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message }
            | Self::Application { message, .. }
            | Self::Transport { message, .. }
            | Self::Config { message } => message,
        }
    }

    /// The preserved server payload or transport diagnostic, when any.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Application { payload, .. } => Some(payload),
            Self::Transport { diagnostic, .. } => Some(diagnostic),
            Self::Validation { .. } | Self::Config { .. } => None,
        }
    }

    /// Whether this failure was raised before any network call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Whether the server answered and reported the failure itself.
    #[must_use]
    pub fn is_application(&self) -> bool {
        matches!(self, Self::Application { .. })
    }

    /// Whether the transport faulted before a usable reply arrived.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Result alias used across the crate.
pub type BridgeResult<T> = std::result::Result<T, BridgeError>;

/// Failures of the copy orchestration, keyed by the step that failed.
#[derive(Debug, Clone, Error)]
pub enum CopyError {
    /// `id` or `parent_id` was missing; nothing was sent to the server.
    #[error(transparent)]
    Validation(BridgeError),

    /// The source resource could not be fetched; the underlying failure is
    /// carried unchanged.
    #[error(transparent)]
    Fetch(BridgeError),

    /// The clone could not be created; the fetched source rides along for
    /// diagnostics.
    #[error("{error}")]
    Create {
        /// The failure returned by the create call.
        error: BridgeError,
        /// The source resource exactly as fetched.
        original: Value,
    },
}

impl CopyError {
    /// The underlying bridge failure.
    #[must_use]
    pub fn bridge_error(&self) -> &BridgeError {
        match self {
            Self::Validation(error) | Self::Fetch(error) => error,
            Self::Create { error, .. } => error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_uses_the_message() {
        let error = BridgeError::Application {
            message: "something broke".to_string(),
            payload: json!({"success": false}),
        };
        assert_eq!(error.to_string(), "something broke");
    }

    #[test]
    fn details_exposes_payload_and_diagnostic() {
        let application = BridgeError::Application {
            message: "m".to_string(),
            payload: json!({"success": false, "msg": "m"}),
        };
        assert_eq!(application.details().unwrap()["msg"], "m");

        let validation = BridgeError::validation("no id provided");
        assert!(validation.details().is_none());
    }

    #[test]
    fn serializes_with_type_tag() {
        let error = BridgeError::validation("no id provided");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"validation\""));
        assert!(json.contains("no id provided"));
    }

    #[test]
    fn copy_error_is_transparent_for_fetch() {
        let inner = BridgeError::Transport {
            message: "connection refused".to_string(),
            diagnostic: Value::Null,
        };
        let error = CopyError::Fetch(inner);
        assert_eq!(error.to_string(), "connection refused");
        assert!(error.bridge_error().is_transport());
    }
}
