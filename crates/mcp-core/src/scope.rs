//! Per-request caller context.
//!
//! A [`RequestScope`] carries the caller's credential and tenant for exactly
//! one tool invocation. The HTTP transport builds it from the inbound request
//! headers; stdio invocations get an empty scope and fall back to the
//! configured API key. Nothing here is shared between requests.

use secrecy::{ExposeSecret, SecretString};

/// Header carrying the caller's bearer credential.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Header carrying the caller's tenant (DataMaker project) identifier.
pub const TENANT_HEADER: &str = "x-project-id";

/// Credential and tenant of the caller of one tool invocation.
///
/// # Examples
///
/// ```
/// use datamaker_mcp_core::RequestScope;
///
/// let scope = RequestScope::from_headers(Some("Bearer abc"), Some("proj-1"));
/// assert!(scope.has_credential());
/// assert_eq!(scope.tenant(), Some("proj-1"));
///
/// let anonymous = RequestScope::default();
/// assert!(!anonymous.has_credential());
/// ```
#[derive(Debug, Default)]
pub struct RequestScope {
    credential: Option<SecretString>,
    tenant: Option<String>,
}

impl RequestScope {
    /// Creates a scope from already-extracted values.
    #[must_use]
    pub fn new(credential: Option<SecretString>, tenant: Option<String>) -> Self {
        Self { credential, tenant }
    }

    /// Builds a scope from raw `authorization` and tenant header values.
    ///
    /// Only `Bearer <token>` authorization values are accepted (scheme is
    /// matched case-insensitively); anything else leaves the credential unset.
    /// Blank values are ignored.
    #[must_use]
    pub fn from_headers(authorization: Option<&str>, tenant: Option<&str>) -> Self {
        let credential = authorization
            .and_then(parse_bearer)
            .map(|token| SecretString::from(token.to_string()));
        let tenant = tenant
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToString::to_string);

        Self { credential, tenant }
    }

    /// Returns `true` if the caller supplied a credential.
    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Caller credential, if any.
    #[must_use]
    pub const fn credential(&self) -> Option<&SecretString> {
        self.credential.as_ref()
    }

    /// Resolves the credential to send upstream: the caller's own, else `fallback`.
    #[must_use]
    pub fn credential_or<'a>(&'a self, fallback: Option<&'a SecretString>) -> Option<&'a str> {
        self.credential
            .as_ref()
            .or(fallback)
            .map(|secret| secret.expose_secret())
    }

    /// Caller tenant (project) identifier, if any.
    #[must_use]
    pub fn tenant(&self) -> Option<&str> {
        self.tenant.as_deref()
    }
}

fn parse_bearer(value: &str) -> Option<&str> {
    let value = value.trim();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extracted() {
        let scope = RequestScope::from_headers(Some("Bearer tok-1"), None);
        assert_eq!(scope.credential_or(None), Some("tok-1"));
    }

    #[test]
    fn test_bearer_scheme_case_insensitive() {
        let scope = RequestScope::from_headers(Some("bearer   tok-2 "), None);
        assert_eq!(scope.credential_or(None), Some("tok-2"));
    }

    #[test]
    fn test_non_bearer_authorization_ignored() {
        let scope = RequestScope::from_headers(Some("Basic dXNlcjpwYXNz"), None);
        assert!(!scope.has_credential());

        let scope = RequestScope::from_headers(Some("Bearer "), None);
        assert!(!scope.has_credential());
    }

    #[test]
    fn test_scope_credential_wins_over_fallback() {
        let fallback = SecretString::from("configured".to_string());
        let scope = RequestScope::from_headers(Some("Bearer caller"), None);
        assert_eq!(scope.credential_or(Some(&fallback)), Some("caller"));

        let anonymous = RequestScope::default();
        assert_eq!(anonymous.credential_or(Some(&fallback)), Some("configured"));
        assert_eq!(anonymous.credential_or(None), None);
    }

    #[test]
    fn test_blank_tenant_ignored() {
        let scope = RequestScope::from_headers(None, Some("   "));
        assert_eq!(scope.tenant(), None);

        let scope = RequestScope::from_headers(None, Some(" p-7 "));
        assert_eq!(scope.tenant(), Some("p-7"));
    }

    #[test]
    fn test_debug_does_not_leak_credential() {
        let scope = RequestScope::from_headers(Some("Bearer leaky-token"), None);
        assert!(!format!("{scope:?}").contains("leaky-token"));
    }
}
