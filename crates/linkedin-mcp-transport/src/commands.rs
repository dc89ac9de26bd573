//! Command catalogue: names, descriptions, parameter schemas and parameter types.

use linkedin_mcp_services::{
    DEFAULT_CONNECTIONS_LIMIT, DEFAULT_JOBS_LIMIT, DEFAULT_PEOPLE_LIMIT, DEFAULT_POSTS_LIMIT,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::protocol::ToolDefinition;

/// A command exposed by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Log in and replace the session's client.
    Authenticate,
    /// Report whether the session is authenticated.
    AuthenticationStatus,
    /// Fetch a profile, or the caller's own.
    ProfileInfo,
    /// Fetch posts of a profile, or the caller's own.
    ProfilePosts,
    /// Search job postings.
    SearchJobs,
    /// Fetch one job posting.
    JobDetails,
    /// Search people.
    SearchPeople,
    /// List connections of a profile, or the caller's own.
    Connections,
}

impl Command {
    /// Every command, in catalogue order.
    pub const ALL: [Self; 8] = [
        Self::Authenticate,
        Self::ProfileInfo,
        Self::ProfilePosts,
        Self::SearchJobs,
        Self::JobDetails,
        Self::SearchPeople,
        Self::Connections,
        Self::AuthenticationStatus,
    ];

    /// Tool name advertised to MCP clients.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Authenticate => "authenticate_linkedin",
            Self::AuthenticationStatus => "get_authentication_status",
            Self::ProfileInfo => "get_profile_info",
            Self::ProfilePosts => "get_profile_posts",
            Self::SearchJobs => "search_linkedin_jobs",
            Self::JobDetails => "get_job_details",
            Self::SearchPeople => "search_linkedin_people",
            Self::Connections => "get_linkedin_connections",
        }
    }

    /// Alternative name accepted on dispatch.
    #[must_use]
    pub const fn alias(self) -> &'static str {
        match self {
            Self::Authenticate => "authenticate",
            Self::AuthenticationStatus => "getAuthenticationStatus",
            Self::ProfileInfo => "getProfileInfo",
            Self::ProfilePosts => "getProfilePosts",
            Self::SearchJobs => "searchJobs",
            Self::JobDetails => "getJobDetails",
            Self::SearchPeople => "searchPeople",
            Self::Connections => "getConnections",
        }
    }

    /// Look a command up by tool name or alias.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == name || c.alias() == name)
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Authenticate => "Authenticate with LinkedIn using email and password",
            Self::AuthenticationStatus => "Check current authentication status",
            Self::ProfileInfo => "Get LinkedIn profile information",
            Self::ProfilePosts => "Get posts from a LinkedIn profile",
            Self::SearchJobs => "Search for job postings on LinkedIn",
            Self::JobDetails => "Get detailed information about a specific job posting",
            Self::SearchPeople => "Search for people on LinkedIn",
            Self::Connections => "Get LinkedIn connections for a profile",
        }
    }

    /// JSON Schema of the command's arguments.
    #[must_use]
    pub fn input_schema(self) -> Value {
        match self {
            Self::Authenticate => json!({
                "type": "object",
                "properties": {
                    "email": { "type": "string", "description": "Account email" },
                    "password": { "type": "string", "description": "Account password" }
                },
                "required": ["email", "password"]
            }),
            Self::AuthenticationStatus => json!({ "type": "object", "properties": {} }),
            Self::ProfileInfo => json!({
                "type": "object",
                "properties": {
                    "profile_id": {
                        "type": "string",
                        "description": "Public id or URN id; omit for your own profile"
                    }
                }
            }),
            Self::ProfilePosts => json!({
                "type": "object",
                "properties": {
                    "profile_id": {
                        "type": "string",
                        "description": "Public id or URN id; omit for your own posts"
                    },
                    "limit": { "type": "integer", "minimum": 0, "default": DEFAULT_POSTS_LIMIT }
                }
            }),
            Self::SearchJobs => json!({
                "type": "object",
                "properties": {
                    "keywords": { "type": "string" },
                    "location": { "type": "string" },
                    "limit": { "type": "integer", "minimum": 0, "default": DEFAULT_JOBS_LIMIT }
                },
                "required": ["keywords"]
            }),
            Self::JobDetails => json!({
                "type": "object",
                "properties": {
                    "job_id": { "type": "string" }
                },
                "required": ["job_id"]
            }),
            Self::SearchPeople => json!({
                "type": "object",
                "properties": {
                    "keywords": { "type": "string" },
                    "limit": { "type": "integer", "minimum": 0, "default": DEFAULT_PEOPLE_LIMIT }
                },
                "required": ["keywords"]
            }),
            Self::Connections => json!({
                "type": "object",
                "properties": {
                    "urn_id": {
                        "type": "string",
                        "description": "Bare profile URN id; omit for your own connections"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 0,
                        "default": DEFAULT_CONNECTIONS_LIMIT
                    }
                }
            }),
        }
    }

    #[must_use]
    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthenticateParams {
    #[serde(alias = "identity")]
    pub email: String,
    #[serde(alias = "secret")]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileParams {
    #[serde(default, alias = "profileId")]
    pub profile_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostsParams {
    #[serde(default, alias = "profileId")]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchJobsParams {
    pub keywords: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobDetailsParams {
    #[serde(alias = "jobId")]
    pub job_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchPeopleParams {
    pub keywords: String,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConnectionsParams {
    #[serde(default, alias = "urnId")]
    pub urn_id: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}
