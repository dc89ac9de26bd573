//! Service layer of the LinkedIn MCP gateway.
//!
//! Each service checks that the shared [`Session`] is authenticated, calls
//! the remote client, and normalizes the outcome into an
//! [`Envelope`](linkedin_mcp_core::Envelope). Remote faults are logged and
//! returned as failures; nothing propagates past a service method.

use std::sync::Arc;

use linkedin_mcp_core::{Envelope, Failure};
use linkedin_mcp_session::Session;

pub mod connections;
pub mod jobs;
pub mod people;
pub mod posts;
pub mod profile;

#[cfg(test)]
mod test_support;

pub use connections::ConnectionsService;
pub use jobs::JobsService;
pub use people::PeopleService;
pub use posts::PostsService;
pub use profile::ProfileService;

/// Default number of posts fetched.
pub const DEFAULT_POSTS_LIMIT: u32 = 10;
/// Default number of job postings fetched.
pub const DEFAULT_JOBS_LIMIT: u32 = 25;
/// Default number of people fetched.
pub const DEFAULT_PEOPLE_LIMIT: u32 = 10;
/// Default number of connections fetched.
pub const DEFAULT_CONNECTIONS_LIMIT: u32 = 50;

/// All five services, sharing one session.
#[derive(Clone)]
pub struct Services {
    /// Profile lookups.
    pub profile: ProfileService,
    /// Post retrieval.
    pub posts: PostsService,
    /// Job search and job details.
    pub jobs: JobsService,
    /// People search.
    pub people: PeopleService,
    /// Connection listing.
    pub connections: ConnectionsService,
}

impl Services {
    #[must_use]
    pub fn new(session: &Arc<Session>) -> Self {
        Self {
            profile: ProfileService::new(Arc::clone(session)),
            posts: PostsService::new(Arc::clone(session)),
            jobs: JobsService::new(Arc::clone(session)),
            people: PeopleService::new(Arc::clone(session)),
            connections: ConnectionsService::new(Arc::clone(session)),
        }
    }
}

/// Log the outcome of an operation and wrap it into its envelope.
///
/// Precondition failures are expected caller misuse and only logged at debug.
pub(crate) fn finish<T>(operation: &str, result: Result<T, Failure>) -> Envelope<T> {
    match &result {
        Ok(_) => tracing::debug!("Finished {operation}"),
        Err(failure) if failure.is_precondition() => {
            tracing::debug!("Rejected {operation}: {failure}");
        }
        Err(failure) => tracing::error!("Error {operation}: {failure}"),
    }
    result.into()
}

/// Treat an empty optional identifier as absent.
pub(crate) fn non_empty(id: Option<&str>) -> Option<&str> {
    id.filter(|id| !id.is_empty())
}
