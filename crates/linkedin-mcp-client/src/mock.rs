//! In-process remote client for tests and offline runs.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use linkedin_mcp_core::{Connector, CredentialConfig, JobSearchParams, RemoteClient, RemoteError};
use serde_json::{Value, json};

/// A call received by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    /// Login attempt, successful or not.
    Login { identity: String },
    /// Profile lookup; `None` is the caller's own profile.
    GetProfile { profile_id: Option<String> },
    /// Posts lookup; `None` is the caller's own posts.
    GetProfilePosts { profile_id: Option<String>, post_count: u32 },
    /// Job search.
    SearchJobs(JobSearchParams),
    /// Job posting lookup.
    GetJob { job_id: String },
    /// People search.
    SearchPeople { keywords: String, limit: u32 },
    /// Connections lookup by bare URN id.
    GetProfileConnections { urn_id: String, limit: u32 },
}

impl RemoteCall {
    /// Whether this is a data call rather than a login.
    #[must_use]
    pub const fn is_data_call(&self) -> bool {
        !matches!(self, Self::Login { .. })
    }
}

type CallLog = Arc<Mutex<Vec<RemoteCall>>>;

fn record(log: &CallLog, call: RemoteCall) {
    log.lock().unwrap_or_else(PoisonError::into_inner).push(call);
}

/// Canned responses handed to every client the connector creates.
#[derive(Debug, Clone)]
struct Fixtures {
    profile: Value,
    posts: Vec<Value>,
    jobs: Vec<Value>,
    job: Value,
    people: Vec<Value>,
    connections: Vec<Value>,
    failure: Option<RemoteError>,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            profile: json!({
                "entityUrn": "urn:li:fs_profile:ACoAAAMock",
                "firstName": "Mock",
                "lastName": "User",
            }),
            posts: Vec::new(),
            jobs: Vec::new(),
            job: json!({}),
            people: Vec::new(),
            connections: Vec::new(),
            failure: None,
        }
    }
}

/// Mock connector.
///
/// Configurable responses and failure injection; every call, including
/// logins, is recorded in a log shared with the clients it hands out.
pub struct MockConnector {
    fixtures: Fixtures,
    reject_logins: AtomicBool,
    calls: CallLog,
}

impl MockConnector {
    /// Create a connector that accepts any login and returns default data.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fixtures: Fixtures::default(),
            reject_logins: AtomicBool::new(false),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the profile returned for any profile lookup.
    #[must_use]
    pub fn with_profile(mut self, profile: Value) -> Self {
        self.fixtures.profile = profile;
        self
    }

    /// Set the posts returned.
    #[must_use]
    pub fn with_posts(mut self, posts: Vec<Value>) -> Self {
        self.fixtures.posts = posts;
        self
    }

    /// Set the job search results.
    #[must_use]
    pub fn with_jobs(mut self, jobs: Vec<Value>) -> Self {
        self.fixtures.jobs = jobs;
        self
    }

    /// Set the job returned by a details lookup.
    #[must_use]
    pub fn with_job(mut self, job: Value) -> Self {
        self.fixtures.job = job;
        self
    }

    /// Set the people search results.
    #[must_use]
    pub fn with_people(mut self, people: Vec<Value>) -> Self {
        self.fixtures.people = people;
        self
    }

    /// Set the connections returned.
    #[must_use]
    pub fn with_connections(mut self, connections: Vec<Value>) -> Self {
        self.fixtures.connections = connections;
        self
    }

    /// Make every data call fail with `error`.
    #[must_use]
    pub fn with_failure(mut self, error: RemoteError) -> Self {
        self.fixtures.failure = Some(error);
        self
    }

    /// Reject logins from now on (or accept them again).
    pub fn set_reject_logins(&self, reject: bool) {
        self.reject_logins.store(reject, Ordering::SeqCst);
    }

    /// All calls received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Data calls received so far, logins excluded.
    #[must_use]
    pub fn data_calls(&self) -> Vec<RemoteCall> {
        self.calls()
            .into_iter()
            .filter(RemoteCall::is_data_call)
            .collect()
    }
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn login(
        &self,
        credentials: &CredentialConfig,
    ) -> Result<Arc<dyn RemoteClient>, RemoteError> {
        record(
            &self.calls,
            RemoteCall::Login {
                identity: credentials.identity().to_string(),
            },
        );

        if self.reject_logins.load(Ordering::SeqCst) {
            return Err(RemoteError::LoginRejected(
                "Mock connector rejects logins".to_string(),
            ));
        }

        Ok(Arc::new(MockClient {
            fixtures: self.fixtures.clone(),
            calls: Arc::clone(&self.calls),
        }))
    }
}

/// Client handed out by [`MockConnector`].
pub struct MockClient {
    fixtures: Fixtures,
    calls: CallLog,
}

impl MockClient {
    fn respond<T: Clone>(&self, call: RemoteCall, value: &T) -> Result<T, RemoteError> {
        record(&self.calls, call);
        match &self.fixtures.failure {
            Some(error) => Err(error.clone()),
            None => Ok(value.clone()),
        }
    }
}

#[async_trait]
impl RemoteClient for MockClient {
    async fn get_profile(&self, profile_id: Option<&str>) -> Result<Value, RemoteError> {
        self.respond(
            RemoteCall::GetProfile {
                profile_id: profile_id.map(ToString::to_string),
            },
            &self.fixtures.profile,
        )
    }

    async fn get_profile_posts(
        &self,
        profile_id: Option<&str>,
        post_count: u32,
    ) -> Result<Vec<Value>, RemoteError> {
        self.respond(
            RemoteCall::GetProfilePosts {
                profile_id: profile_id.map(ToString::to_string),
                post_count,
            },
            &self.fixtures.posts,
        )
    }

    async fn search_jobs(&self, params: &JobSearchParams) -> Result<Vec<Value>, RemoteError> {
        self.respond(RemoteCall::SearchJobs(params.clone()), &self.fixtures.jobs)
    }

    async fn get_job(&self, job_id: &str) -> Result<Value, RemoteError> {
        self.respond(
            RemoteCall::GetJob {
                job_id: job_id.to_string(),
            },
            &self.fixtures.job,
        )
    }

    async fn search_people(&self, keywords: &str, limit: u32) -> Result<Vec<Value>, RemoteError> {
        self.respond(
            RemoteCall::SearchPeople {
                keywords: keywords.to_string(),
                limit,
            },
            &self.fixtures.people,
        )
    }

    async fn get_profile_connections(
        &self,
        urn_id: &str,
        limit: u32,
    ) -> Result<Vec<Value>, RemoteError> {
        self.respond(
            RemoteCall::GetProfileConnections {
                urn_id: urn_id.to_string(),
                limit,
            },
            &self.fixtures.connections,
        )
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let connector = MockConnector::new().with_people(vec![json!({ "name": "Grace" })]);
        let client = assert_ok!(
            connector
                .login(&CredentialConfig::new("me@example.com", "pw"))
                .await
        );

        let people = assert_ok!(client.search_people("compilers", 3).await);
        assert_eq!(people.len(), 1);

        assert_eq!(
            connector.calls(),
            vec![
                RemoteCall::Login {
                    identity: "me@example.com".to_string()
                },
                RemoteCall::SearchPeople {
                    keywords: "compilers".to_string(),
                    limit: 3
                },
            ]
        );
        assert_eq!(connector.data_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_rejects_logins() {
        let connector = MockConnector::new();
        connector.set_reject_logins(true);

        let result = connector
            .login(&CredentialConfig::new("me@example.com", "pw"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_failure_injection() {
        let connector =
            MockConnector::new().with_failure(RemoteError::Other("throttled".to_string()));
        let client = assert_ok!(
            connector
                .login(&CredentialConfig::new("me@example.com", "pw"))
                .await
        );

        let err = client.get_job("1").await.unwrap_err();
        assert_eq!(err.to_string(), "throttled");
    }
}
