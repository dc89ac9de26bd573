//! Session state machine.

use std::sync::Arc;

use linkedin_mcp_core::{Connector, CredentialConfig, Failure, RemoteClient};
use tokio::sync::RwLock;

/// Authentication state. A client handle exists only once a login succeeded.
enum AuthState {
    Unauthenticated,
    Authenticated(Arc<dyn RemoteClient>),
}

/// The single authenticated session of a running gateway.
///
/// Starts unauthenticated. Every call to [`Session::authenticate`] first
/// drops the current client, so a failed re-authentication leaves the
/// session unauthenticated even if it was authenticated before. There is
/// no other way out of the authenticated state.
///
/// Mutation is single-writer: `authenticate` holds the write lock for the
/// whole login call, so concurrent attempts run one after the other.
pub struct Session {
    connector: Arc<dyn Connector>,
    state: RwLock<AuthState>,
}

impl Session {
    /// Create an unauthenticated session that logs in through `connector`.
    #[must_use]
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            state: RwLock::new(AuthState::Unauthenticated),
        }
    }

    /// Log in with `credentials`, replacing any previous client.
    ///
    /// Returns whether the session is now authenticated. Login faults are
    /// logged, never propagated.
    pub async fn authenticate(&self, credentials: CredentialConfig) -> bool {
        let mut state = self.state.write().await;
        *state = AuthState::Unauthenticated;

        match self.connector.login(&credentials).await {
            Ok(client) => {
                *state = AuthState::Authenticated(client);
                tracing::info!(
                    identity = credentials.identity(),
                    "Successfully authenticated with LinkedIn"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    identity = credentials.identity(),
                    "LinkedIn authentication failed: {e}"
                );
                false
            }
        }
    }

    /// Whether data operations are currently allowed.
    pub async fn is_authenticated(&self) -> bool {
        matches!(*self.state.read().await, AuthState::Authenticated(_))
    }

    /// The authenticated client, or [`Failure::NotAuthenticated`].
    ///
    /// # Errors
    /// Returns `NotAuthenticated` if no login has succeeded since the last attempt.
    pub async fn client(&self) -> Result<Arc<dyn RemoteClient>, Failure> {
        match &*self.state.read().await {
            AuthState::Authenticated(client) => Ok(Arc::clone(client)),
            AuthState::Unauthenticated => Err(Failure::NotAuthenticated),
        }
    }
}

#[cfg(test)]
mod tests {
    use linkedin_mcp_client::{MockConnector, RemoteCall};
    use tokio_test::assert_ok;

    use super::*;

    fn creds() -> CredentialConfig {
        CredentialConfig::new("me@example.com", "pw")
    }

    #[tokio::test]
    async fn test_starts_unauthenticated() {
        let session = Session::new(Arc::new(MockConnector::new()));

        assert!(!session.is_authenticated().await);
        assert!(matches!(
            session.client().await,
            Err(Failure::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_successful_login() {
        let session = Session::new(Arc::new(MockConnector::new()));

        assert!(session.authenticate(creds()).await);
        assert!(session.is_authenticated().await);
        assert_ok!(session.client().await);
    }

    #[tokio::test]
    async fn test_failed_login_stays_unauthenticated() {
        let connector = Arc::new(MockConnector::new());
        connector.set_reject_logins(true);
        let session = Session::new(connector);

        assert!(!session.authenticate(creds()).await);
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_failed_reauthentication_invalidates_session() {
        let connector = Arc::new(MockConnector::new());
        let session = Session::new(Arc::clone(&connector) as Arc<dyn Connector>);

        assert!(session.authenticate(creds()).await);
        assert!(session.is_authenticated().await);

        connector.set_reject_logins(true);
        assert!(!session.authenticate(creds()).await);
        assert!(!session.is_authenticated().await);
        assert!(session.client().await.is_err());
    }

    #[tokio::test]
    async fn test_reauthentication_replaces_client() {
        let connector = Arc::new(MockConnector::new());
        let session = Session::new(Arc::clone(&connector) as Arc<dyn Connector>);

        assert!(session.authenticate(creds()).await);
        let first = assert_ok!(session.client().await);
        assert!(session.authenticate(creds()).await);
        let second = assert_ok!(session.client().await);

        assert!(!Arc::ptr_eq(&first, &second));
        let logins = connector
            .calls()
            .into_iter()
            .filter(|c| matches!(c, RemoteCall::Login { .. }))
            .count();
        assert_eq!(logins, 2);
    }

    #[tokio::test]
    async fn test_concurrent_logins_serialize() {
        let connector = Arc::new(MockConnector::new());
        let session = Arc::new(Session::new(connector));

        let (a, b) = tokio::join!(session.authenticate(creds()), session.authenticate(creds()));
        assert!(a && b);
        assert!(session.is_authenticated().await);
    }
}
