//! Profile lookups.

use std::sync::Arc;

use linkedin_mcp_core::{Envelope, Failure, ProfilePayload};
use linkedin_mcp_session::Session;

use crate::{finish, non_empty};

#[derive(Clone)]
pub struct ProfileService {
    session: Arc<Session>,
}

impl ProfileService {
    #[must_use]
    pub const fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Fetch the profile with the given public id or URN id, or the caller's own.
    pub async fn get_profile(&self, profile_id: Option<&str>) -> Envelope<ProfilePayload> {
        finish("retrieving profile", self.fetch(non_empty(profile_id)).await)
    }

    async fn fetch(&self, profile_id: Option<&str>) -> Result<ProfilePayload, Failure> {
        let client = self.session.client().await?;
        let profile = client.get_profile(profile_id).await?;
        Ok(ProfilePayload::new(profile))
    }
}
