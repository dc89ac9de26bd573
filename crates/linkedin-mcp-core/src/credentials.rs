//! Credentials for a single authentication attempt.

use std::fmt;

/// Login credentials for the remote service.
///
/// Built once per authentication attempt and handed to a
/// [`Connector`](crate::Connector). Never persisted, and the secret is
/// redacted from `Debug` output so it cannot leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialConfig {
    identity: String,
    secret: String,
}

impl CredentialConfig {
    /// Create credentials from an identity (account email) and a secret.
    #[must_use]
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            secret: secret.into(),
        }
    }

    /// Account identity used to log in.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Account secret used to log in.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("identity", &self.identity)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let creds = CredentialConfig::new("me@example.com", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("me@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_accessors() {
        let creds = CredentialConfig::new("me@example.com", "hunter2");
        assert_eq!(creds.identity(), "me@example.com");
        assert_eq!(creds.secret(), "hunter2");
    }
}
