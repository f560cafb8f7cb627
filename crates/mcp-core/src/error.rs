//! Error types for the DataMaker MCP adapter.
//!
//! Every library crate in the workspace reports failures through [`Error`].
//! Tool handlers never let these escape to the protocol layer: they render
//! them as `Error: <message>` text instead, so the `Display` output of each
//! variant is what an MCP client ends up reading.
//!
//! # Examples
//!
//! ```
//! use datamaker_mcp_core::{Error, Result};
//!
//! fn find_template(id: &str) -> Result<()> {
//!     Err(Error::ResourceNotFound {
//!         resource: format!("Template with id {id}"),
//!     })
//! }
//!
//! let err = find_template("t-1").unwrap_err();
//! assert!(err.is_not_found());
//! ```

use thiserror::Error;

/// Main error type for the DataMaker MCP adapter.
#[derive(Error, Debug)]
pub enum Error {
    /// The remote API (or a user-defined endpoint) answered with a non-2xx status.
    ///
    /// Status and body are reported together so the caller sees exactly what
    /// the upstream system said.
    #[error("HTTP error! status: {status}, body: {body}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Raw response body (possibly empty)
        body: String,
    },

    /// The request never produced an HTTP response.
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// Target URL
        url: String,
        /// Underlying client error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A response body was neither valid JSON nor readable UTF-8 text.
    #[error("Response body is neither JSON nor text: {json_error}; {text_error}")]
    UnreadableBody {
        /// Error reported by the JSON parser
        json_error: String,
        /// Error reported by the UTF-8 decoder
        text_error: String,
    },

    /// Serialization/deserialization error.
    ///
    /// Raised when JSON conversion of a value we own fails.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Object storage write or URL-signing failure.
    #[error("Storage error during {operation}: {message}")]
    Storage {
        /// Storage operation that failed (`put`, `presign`)
        operation: String,
        /// Backend error message
        message: String,
    },

    /// Resource not found error.
    ///
    /// Occurs when a referenced template, endpoint or resource does not exist.
    #[error("{resource} not found")]
    ResourceNotFound {
        /// Identifier of the missing resource
        resource: String,
    },

    /// Validation error for inbound data.
    #[error("Validation error in {field}: {reason}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Detailed reason for the validation failure
        reason: String,
    },

    /// CSRF token negotiation with an endpoint failed.
    #[error("CSRF negotiation failed: {message}")]
    Csrf {
        /// What went wrong
        message: String,
    },

    /// Configuration error.
    ///
    /// Raised when the environment is missing required values or contains
    /// contradictory settings.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },
}

impl Error {
    /// Convenience constructor for [`Error::Serialization`].
    #[must_use]
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Convenience constructor for [`Error::Storage`].
    #[must_use]
    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is an upstream (non-2xx) error.
    ///
    /// # Examples
    ///
    /// ```
    /// use datamaker_mcp_core::Error;
    ///
    /// let err = Error::Upstream { status: 502, body: "bad gateway".to_string() };
    /// assert!(err.is_upstream());
    /// assert_eq!(err.status(), Some(502));
    /// ```
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }

    /// Returns the upstream HTTP status, if this error carries one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a storage error.
    #[must_use]
    pub const fn is_storage_error(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }

    /// Returns `true` if this is a resource not found error.
    ///
    /// # Examples
    ///
    /// ```
    /// use datamaker_mcp_core::Error;
    ///
    /// let err = Error::ResourceNotFound {
    ///     resource: "Endpoint e-1".to_string(),
    /// };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a validation error.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// Returns `true` if this is a CSRF negotiation error.
    #[must_use]
    pub const fn is_csrf_error(&self) -> bool {
        matches!(self, Self::Csrf { .. })
    }
}

/// Result type alias used throughout the workspace.
///
/// # Examples
///
/// ```
/// use datamaker_mcp_core::{Result, Error};
///
/// fn validate_quantity(value: i64) -> Result<i64> {
///     if value < 0 {
///         return Err(Error::ValidationError {
///             field: "quantity".to_string(),
///             reason: "must be non-negative".to_string(),
///         });
///     }
///     Ok(value)
/// }
///
/// assert!(validate_quantity(5).is_ok());
/// assert!(validate_quantity(-1).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_reports_status_and_body() {
        let err = Error::Upstream {
            status: 404,
            body: "{\"message\":\"missing\"}".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("404"));
        assert!(display.contains("missing"));
        assert!(err.is_upstream());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_unreadable_body_concatenates_both_errors() {
        let err = Error::UnreadableBody {
            json_error: "expected value at line 1".to_string(),
            text_error: "invalid utf-8 sequence".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("expected value at line 1"));
        assert!(display.contains("invalid utf-8 sequence"));
    }

    #[test]
    fn test_storage_error_detection() {
        let err = Error::storage("put", "access denied");
        assert!(err.is_storage_error());
        assert!(!err.is_upstream());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("put"));
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::ResourceNotFound {
            resource: "Template with id abc".to_string(),
        };
        assert_eq!(err.to_string(), "Template with id abc not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_config_and_validation_detection() {
        let config = Error::ConfigError {
            message: "bad url".to_string(),
        };
        assert!(config.is_config_error());
        assert!(!config.is_validation_error());

        let validation = Error::ValidationError {
            field: "name".to_string(),
            reason: "empty".to_string(),
        };
        assert!(validation.is_validation_error());
        assert!(!validation.is_csrf_error());
    }

    #[test]
    fn test_serialization_constructor_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::serialization("failed to encode result", source);
        assert!(std::error::Error::source(&err).is_some());
    }
}
