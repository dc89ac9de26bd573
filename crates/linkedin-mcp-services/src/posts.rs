//! Post retrieval.

use std::sync::Arc;

use linkedin_mcp_core::{Envelope, Failure, PostsPayload};
use linkedin_mcp_session::Session;

use crate::{finish, non_empty};

#[derive(Clone)]
pub struct PostsService {
    session: Arc<Session>,
}

impl PostsService {
    #[must_use]
    pub const fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Fetch up to `limit` posts of a profile, or of the caller.
    pub async fn get_posts(&self, profile_id: Option<&str>, limit: u32) -> Envelope<PostsPayload> {
        finish(
            "retrieving posts",
            self.fetch(non_empty(profile_id), limit).await,
        )
    }

    async fn fetch(&self, profile_id: Option<&str>, limit: u32) -> Result<PostsPayload, Failure> {
        let client = self.session.client().await?;
        let posts = client.get_profile_posts(profile_id, limit).await?;
        Ok(PostsPayload::new(posts))
    }
}
