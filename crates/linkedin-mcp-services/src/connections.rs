//! Connection listing.

use std::sync::Arc;

use linkedin_mcp_core::{ConnectionsPayload, Envelope, Failure, RemoteClient};
use linkedin_mcp_session::Session;
use serde_json::Value;

use crate::{finish, non_empty};

/// Namespace prefix of profile URNs.
pub const PROFILE_URN_PREFIX: &str = "urn:li:fs_profile:";

/// Strip the profile namespace from an entity URN, leaving the bare id.
#[must_use]
pub fn bare_urn_id(entity_urn: &str) -> String {
    entity_urn.replace(PROFILE_URN_PREFIX, "")
}

#[derive(Clone)]
pub struct ConnectionsService {
    session: Arc<Session>,
}

impl ConnectionsService {
    #[must_use]
    pub const fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// List connections of the profile with the given bare URN id.
    ///
    /// Without an id, the caller's own profile is fetched first and its
    /// `entityUrn` is used. If that yields nothing, the operation fails with
    /// [`Failure::CouldNotResolveOwnIdentity`] and no connections are fetched.
    pub async fn get_connections(
        &self,
        urn_id: Option<&str>,
        limit: u32,
    ) -> Envelope<ConnectionsPayload> {
        finish(
            "retrieving connections",
            self.fetch(non_empty(urn_id), limit).await,
        )
    }

    async fn fetch(&self, urn_id: Option<&str>, limit: u32) -> Result<ConnectionsPayload, Failure> {
        let client = self.session.client().await?;
        let urn_id = match urn_id {
            Some(id) => id.to_string(),
            None => own_urn_id(client.as_ref()).await?,
        };
        let connections = client.get_profile_connections(&urn_id, limit).await?;
        Ok(ConnectionsPayload::new(connections))
    }
}

async fn own_urn_id(client: &dyn RemoteClient) -> Result<String, Failure> {
    let profile = client.get_profile(None).await?;
    let urn_id = profile
        .get("entityUrn")
        .and_then(Value::as_str)
        .map(bare_urn_id)
        .unwrap_or_default();

    if urn_id.is_empty() {
        return Err(Failure::CouldNotResolveOwnIdentity);
    }
    Ok(urn_id)
}
