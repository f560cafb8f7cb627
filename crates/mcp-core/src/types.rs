//! Strong domain types for DataMaker identifiers.
//!
//! Identifiers end up as URL path segments of the remote API
//! (`templates/{id}`, `endpoints/{id}/...`), so they are validated once at
//! the tool boundary: empty values and values containing path or query
//! delimiters are rejected.
//!
//! # Examples
//!
//! ```
//! use datamaker_mcp_core::{EndpointId, TemplateId};
//!
//! let template = TemplateId::parse("tpl_123").unwrap();
//! assert_eq!(template.as_str(), "tpl_123");
//!
//! assert!(EndpointId::parse("../admin").is_err());
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters that would change the meaning of a URL path segment.
const FORBIDDEN_ID_CHARS: &[char] = &['/', '\\', '?', '#', '%'];

fn validate_id(kind: &str, raw: &str) -> Result<()> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::ValidationError {
            field: kind.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if trimmed.len() != raw.len() {
        return Err(Error::ValidationError {
            field: kind.to_string(),
            reason: "must not have leading or trailing whitespace".to_string(),
        });
    }
    if raw.contains(FORBIDDEN_ID_CHARS) || raw == "." || raw == ".." {
        return Err(Error::ValidationError {
            field: kind.to_string(),
            reason: format!("'{raw}' is not a valid identifier"),
        });
    }
    Ok(())
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validates and wraps a raw identifier.
            ///
            /// # Errors
            ///
            /// Returns [`Error::ValidationError`] when the value is empty,
            /// padded with whitespace, or contains `/`, `\`, `?`, `#` or `%`.
            pub fn parse(raw: impl Into<String>) -> Result<Self> {
                let raw = raw.into();
                validate_id($field, &raw)?;
                Ok(Self(raw))
            }

            /// Returns the identifier as a string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the identifier and returns the inner `String`.
            #[inline]
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(value: String) -> Result<Self> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

identifier!(
    /// Identifier of a DataMaker template.
    TemplateId,
    "template_id"
);

identifier!(
    /// Identifier of a database connection.
    ConnectionId,
    "connection_id"
);

identifier!(
    /// Identifier of a user-defined endpoint.
    EndpointId,
    "endpoint_id"
);

identifier!(
    /// Identifier of a scenario (server-side Python code).
    ScenarioId,
    "scenario_id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_id_creation() {
        let id = TemplateId::parse("tpl-1").unwrap();
        assert_eq!(id.as_str(), "tpl-1");
        assert_eq!(id.to_string(), "tpl-1");
    }

    #[test]
    fn test_id_into_inner() {
        let id = ScenarioId::parse("sc_9").unwrap();
        assert_eq!(id.into_inner(), "sc_9");
    }

    #[test]
    fn test_empty_id_rejected() {
        let err = ConnectionId::parse("").unwrap_err();
        assert!(err.is_validation_error());
        assert!(err.to_string().contains("connection_id"));
    }

    #[test]
    fn test_whitespace_padded_id_rejected() {
        assert!(EndpointId::parse(" e1").is_err());
        assert!(EndpointId::parse("e1 ").is_err());
    }

    #[test]
    fn test_path_delimiters_rejected() {
        for raw in ["a/b", "a?b", "a#b", "a%2F", "..", ".", "a\\b"] {
            assert!(TemplateId::parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_id_deserialization_validates() {
        let ok: TemplateId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(ok.as_str(), "abc");

        let bad = serde_json::from_str::<TemplateId>("\"a/b\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = EndpointId::parse("ep").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ep\"");
    }
}
