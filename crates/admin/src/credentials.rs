//! Bearer credentials for authenticated backend calls.

use secrecy::{ExposeSecret, SecretString};

/// The bearer token sent with authenticated requests.
///
/// Passed explicitly to every call that needs it; the client never stores a
/// token of its own. Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct Credentials {
    token: SecretString,
}

impl Credentials {
    /// Wrap a raw bearer token.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }

    #[must_use]
    pub const fn from_secret(token: SecretString) -> Self {
        Self { token }
    }

    pub(crate) fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(self.token.expose_secret())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let creds = Credentials::bearer("abc.def.ghi");
        let debug = format!("{creds:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("abc.def"));
    }
}
