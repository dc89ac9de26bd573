//! Uniform result envelope returned by every gateway operation.
//!
//! Operations produce a typed `Result<Payload, Failure>`. The JSON shape
//! callers see is decided only at serialization time:
//!
//! - success: `{"success": true, ...payload fields}`
//! - [`Failure::NotAuthenticated`]: `{"success": false, "message": ...}`
//! - any other failure: `{"success": false, "error": ...}`

use std::fmt;

use chrono::{Local, NaiveDateTime};
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::{JobSearchParams, RemoteError};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Local wall-clock time, rendered as an ISO-8601 date-time without offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Current local time.
    #[must_use]
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    /// Parse a timestamp as emitted in envelopes.
    ///
    /// # Errors
    /// Returns error if `s` is not an ISO-8601 local date-time.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(Self)
    }

    /// Underlying date-time.
    #[must_use]
    pub const fn as_naive(&self) -> &NaiveDateTime {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Why an operation did not succeed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Failure {
    /// A data operation was attempted before a successful login.
    #[error("Not authenticated. Please authenticate first.")]
    NotAuthenticated,
    /// The remote call itself failed.
    #[error(transparent)]
    Upstream(#[from] RemoteError),
    /// The caller's own profile carried no usable URN.
    #[error("Could not retrieve own profile URN")]
    CouldNotResolveOwnIdentity,
}

impl Failure {
    /// Precondition failures are reported with `message`, everything else with `error`.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }
}

/// Result of one gateway operation, serializable as the wire envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T>(Result<T, Failure>);

impl<T> Envelope<T> {
    /// Successful envelope.
    #[must_use]
    pub const fn success(payload: T) -> Self {
        Self(Ok(payload))
    }

    /// Failed envelope.
    #[must_use]
    pub const fn failure(failure: Failure) -> Self {
        Self(Err(failure))
    }

    /// Whether the operation succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0.is_ok()
    }

    /// Borrow the typed result.
    #[must_use]
    pub const fn as_result(&self) -> Result<&T, &Failure> {
        self.0.as_ref()
    }

    /// Unwrap into the typed result.
    ///
    /// # Errors
    /// Returns the failure the operation ended with.
    pub fn into_result(self) -> Result<T, Failure> {
        self.0
    }
}

impl<T> From<Result<T, Failure>> for Envelope<T> {
    fn from(result: Result<T, Failure>) -> Self {
        Self(result)
    }
}

#[derive(Serialize)]
struct SuccessWire<'a, T> {
    success: bool,
    #[serde(flatten)]
    payload: &'a T,
}

#[derive(Serialize)]
struct MessageWire {
    success: bool,
    message: String,
}

#[derive(Serialize)]
struct ErrorWire {
    success: bool,
    error: String,
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Ok(payload) => SuccessWire {
                success: true,
                payload,
            }
            .serialize(serializer),
            Err(failure) if failure.is_precondition() => MessageWire {
                success: false,
                message: failure.to_string(),
            }
            .serialize(serializer),
            Err(failure) => ErrorWire {
                success: false,
                error: failure.to_string(),
            }
            .serialize(serializer),
        }
    }
}

/// A profile lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfilePayload {
    /// Profile object as returned by the remote.
    pub profile: Value,
    /// When the data was fetched.
    pub retrieved_at: Timestamp,
}

impl ProfilePayload {
    #[must_use]
    pub fn new(profile: Value) -> Self {
        Self {
            profile,
            retrieved_at: Timestamp::now(),
        }
    }
}

/// Posts of one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostsPayload {
    /// Posts as returned by the remote.
    pub posts: Vec<Value>,
    /// Number of entries in the list.
    pub count: usize,
    /// When the data was fetched.
    pub retrieved_at: Timestamp,
}

impl PostsPayload {
    #[must_use]
    pub fn new(posts: Vec<Value>) -> Self {
        Self {
            count: posts.len(),
            posts,
            retrieved_at: Timestamp::now(),
        }
    }
}

/// Job search results, with the parameters that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobsPayload {
    /// Matching job postings.
    pub jobs: Vec<Value>,
    /// Number of entries in the list.
    pub count: usize,
    /// Parameters sent to the remote.
    pub search_params: JobSearchParams,
    /// When the data was fetched.
    pub retrieved_at: Timestamp,
}

impl JobsPayload {
    #[must_use]
    pub fn new(jobs: Vec<Value>, search_params: JobSearchParams) -> Self {
        Self {
            count: jobs.len(),
            jobs,
            search_params,
            retrieved_at: Timestamp::now(),
        }
    }
}

/// A single job posting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPayload {
    /// Job posting as returned by the remote.
    pub job: Value,
    /// When the data was fetched.
    pub retrieved_at: Timestamp,
}

impl JobPayload {
    #[must_use]
    pub fn new(job: Value) -> Self {
        Self {
            job,
            retrieved_at: Timestamp::now(),
        }
    }
}

/// People search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeoplePayload {
    /// Matching people.
    pub people: Vec<Value>,
    /// Number of entries in the list.
    pub count: usize,
    /// When the data was fetched.
    pub retrieved_at: Timestamp,
}

impl PeoplePayload {
    #[must_use]
    pub fn new(people: Vec<Value>) -> Self {
        Self {
            count: people.len(),
            people,
            retrieved_at: Timestamp::now(),
        }
    }
}

/// Connections of one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionsPayload {
    /// Connection entries.
    pub connections: Vec<Value>,
    /// Number of entries in the list.
    pub count: usize,
    /// When the data was fetched.
    pub retrieved_at: Timestamp,
}

impl ConnectionsPayload {
    #[must_use]
    pub fn new(connections: Vec<Value>) -> Self {
        Self {
            count: connections.len(),
            connections,
            retrieved_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_success_envelope_flattens_payload() {
        let posts = vec![json!({"id": 1}), json!({"id": 2})];
        let envelope = Envelope::success(PostsPayload::new(posts));
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["count"], 2);
        assert_eq!(value["posts"].as_array().unwrap().len(), 2);
        let retrieved_at = value["retrieved_at"].as_str().unwrap();
        assert!(Timestamp::parse(retrieved_at).is_ok());
    }

    #[test]
    fn test_not_authenticated_uses_message() {
        let envelope: Envelope<ProfilePayload> = Envelope::failure(Failure::NotAuthenticated);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], false);
        assert!(value["message"].as_str().unwrap().contains("authenticate"));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_upstream_failure_uses_error() {
        let envelope: Envelope<JobPayload> =
            Envelope::failure(RemoteError::Network("connection reset".to_string()).into());
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Network error: connection reset");
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_unresolved_identity_uses_error() {
        let envelope: Envelope<ConnectionsPayload> =
            Envelope::failure(Failure::CouldNotResolveOwnIdentity);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["error"], "Could not retrieve own profile URN");
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_single_object_payloads_have_no_count() {
        let value =
            serde_json::to_value(Envelope::success(ProfilePayload::new(json!({})))).unwrap();
        assert!(value.get("count").is_none());
        assert!(value.get("profile").is_some());
    }

    #[test]
    fn test_timestamp_format() {
        let ts = Timestamp::now();
        let rendered = ts.to_string();
        assert_eq!(rendered.len(), "2024-01-01T00:00:00.000000".len());
        assert_eq!(Timestamp::parse(&rendered).unwrap().to_string(), rendered);
    }
}
