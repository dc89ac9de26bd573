//! Capability traits for the remote professional-network service.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::CredentialConfig;

/// Error raised by a remote call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// Login was refused by the service.
    #[error("Login rejected: {0}")]
    LoginRejected(String),
    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),
    /// The response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),
    /// Any other fault reported by the client.
    #[error("{0}")]
    Other(String),
}

/// Job search parameters.
///
/// Sent to the remote as-is and echoed back in the jobs envelope as
/// `search_params`. `location` is left out entirely when not supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSearchParams {
    /// Search keywords.
    pub keywords: String,
    /// Maximum number of postings.
    pub limit: u32,
    /// Location filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl JobSearchParams {
    /// Build search parameters. An empty location counts as no location.
    #[must_use]
    pub fn new(keywords: impl Into<String>, location: Option<String>, limit: u32) -> Self {
        Self {
            keywords: keywords.into(),
            limit,
            location: location.filter(|l| !l.is_empty()),
        }
    }
}

/// An authenticated handle on the remote service.
///
/// Obtained from a [`Connector`]. Implementations perform the actual
/// network calls; the gateway only relies on this surface.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Fetch a profile by public id or URN id, or the caller's own profile.
    async fn get_profile(&self, profile_id: Option<&str>) -> Result<Value, RemoteError>;

    /// Fetch up to `post_count` posts of a profile, or of the caller.
    async fn get_profile_posts(
        &self,
        profile_id: Option<&str>,
        post_count: u32,
    ) -> Result<Vec<Value>, RemoteError>;

    /// Search job postings.
    async fn search_jobs(&self, params: &JobSearchParams) -> Result<Vec<Value>, RemoteError>;

    /// Fetch a single job posting.
    async fn get_job(&self, job_id: &str) -> Result<Value, RemoteError>;

    /// Search people by keywords.
    async fn search_people(&self, keywords: &str, limit: u32) -> Result<Vec<Value>, RemoteError>;

    /// List first-degree connections of the profile with the given bare URN id.
    async fn get_profile_connections(
        &self,
        urn_id: &str,
        limit: u32,
    ) -> Result<Vec<Value>, RemoteError>;
}

/// Performs the login call and hands out an authenticated client.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Log in with the given credentials.
    async fn login(
        &self,
        credentials: &CredentialConfig,
    ) -> Result<Arc<dyn RemoteClient>, RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_omit_missing_location() {
        let params = JobSearchParams::new("python developer", None, 5);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "keywords": "python developer", "limit": 5 })
        );
    }

    #[test]
    fn test_search_params_empty_location_is_dropped() {
        let params = JobSearchParams::new("rust", Some(String::new()), 25);
        assert_eq!(params.location, None);
    }

    #[test]
    fn test_search_params_keep_location() {
        let params = JobSearchParams::new("rust", Some("Berlin".to_string()), 25);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["location"], "Berlin");
    }

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::Status {
            status: 429,
            body: "slow down".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 429: slow down");
    }
}
