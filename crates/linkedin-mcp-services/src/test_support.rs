use std::sync::Arc;

use linkedin_mcp_client::MockConnector;
use linkedin_mcp_core::{Connector, CredentialConfig};
use linkedin_mcp_session::Session;

/// A session logged in through `connector`.
pub async fn authenticated(connector: MockConnector) -> (Arc<MockConnector>, Arc<Session>) {
    let connector = Arc::new(connector);
    let session = Arc::new(Session::new(Arc::clone(&connector) as Arc<dyn Connector>));
    assert!(
        session
            .authenticate(CredentialConfig::new("me@example.com", "pw"))
            .await
    );
    (connector, session)
}

/// A session that never logged in.
pub fn unauthenticated(connector: MockConnector) -> (Arc<MockConnector>, Arc<Session>) {
    let connector = Arc::new(connector);
    let session = Arc::new(Session::new(Arc::clone(&connector) as Arc<dyn Connector>));
    (connector, session)
}
