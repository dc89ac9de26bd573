//! Command dispatch onto the session and services.

use std::sync::Arc;

use linkedin_mcp_core::{CredentialConfig, Timestamp};
use linkedin_mcp_services::{
    DEFAULT_CONNECTIONS_LIMIT, DEFAULT_JOBS_LIMIT, DEFAULT_PEOPLE_LIMIT, DEFAULT_POSTS_LIMIT,
    Services,
};
use linkedin_mcp_session::Session;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    commands::{
        AuthenticateParams, Command, ConnectionsParams, JobDetailsParams, PostsParams,
        ProfileParams, SearchJobsParams, SearchPeopleParams,
    },
    protocol::ToolDefinition,
};

const AUTHENTICATED_MESSAGE: &str = "Successfully authenticated with LinkedIn";
const NOT_AUTHENTICATED_MESSAGE: &str = "Not authenticated with LinkedIn";
const AUTHENTICATION_FAILED_MESSAGE: &str = "Authentication failed";

/// Errors raised before a command runs. Command outcomes are envelopes instead.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No command has this name or alias.
    #[error("Unknown tool: {0}")]
    UnknownCommand(String),

    /// Arguments missing or of the wrong type.
    #[error("Invalid arguments for {command}: {reason}")]
    InvalidParams {
        command: &'static str,
        reason: String,
    },

    /// The envelope could not be turned into JSON.
    #[error("Failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Outcome of an authentication attempt.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticationOutcome {
    /// Whether the login succeeded.
    pub success: bool,
    /// Fixed success or failure message.
    pub message: &'static str,
    /// Time of the successful login; absent on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticated_at: Option<Timestamp>,
}

/// Current authentication state as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticationStatus {
    /// Mirrors `authenticated`.
    pub success: bool,
    /// Whether data commands are currently allowed.
    pub authenticated: bool,
    /// Fixed message describing the state.
    pub message: &'static str,
}

/// Maps command names and JSON arguments onto the shared session and services.
#[derive(Clone)]
pub struct CommandRegistry {
    session: Arc<Session>,
    services: Services,
}

impl CommandRegistry {
    #[must_use]
    pub fn new(session: Arc<Session>) -> Self {
        let services = Services::new(&session);
        Self { session, services }
    }

    #[must_use]
    pub const fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Definitions of every command, in catalogue order.
    #[must_use]
    pub fn tools() -> Vec<ToolDefinition> {
        Command::ALL.into_iter().map(Command::definition).collect()
    }

    /// Run the command called `name` and return its envelope.
    ///
    /// `arguments` may be `null` for commands without required parameters.
    ///
    /// # Errors
    /// Fails if the name is unknown or the arguments do not match the command.
    pub async fn dispatch(&self, name: &str, arguments: Value) -> Result<Value, DispatchError> {
        let command = Command::from_name(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;
        tracing::debug!(command = command.name(), "Dispatching command");

        let envelope = match command {
            Command::Authenticate => {
                let params: AuthenticateParams = parse(command, arguments)?;
                serde_json::to_value(self.authenticate(params).await)?
            }
            Command::AuthenticationStatus => {
                serde_json::to_value(self.authentication_status().await)?
            }
            Command::ProfileInfo => {
                let params: ProfileParams = parse(command, arguments)?;
                serde_json::to_value(
                    self.services
                        .profile
                        .get_profile(params.profile_id.as_deref())
                        .await,
                )?
            }
            Command::ProfilePosts => {
                let params: PostsParams = parse(command, arguments)?;
                serde_json::to_value(
                    self.services
                        .posts
                        .get_posts(
                            params.profile_id.as_deref(),
                            params.limit.unwrap_or(DEFAULT_POSTS_LIMIT),
                        )
                        .await,
                )?
            }
            Command::SearchJobs => {
                let params: SearchJobsParams = parse(command, arguments)?;
                serde_json::to_value(
                    self.services
                        .jobs
                        .search_jobs(
                            &params.keywords,
                            params.location.as_deref(),
                            params.limit.unwrap_or(DEFAULT_JOBS_LIMIT),
                        )
                        .await,
                )?
            }
            Command::JobDetails => {
                let params: JobDetailsParams = parse(command, arguments)?;
                serde_json::to_value(self.services.jobs.get_job_details(&params.job_id).await)?
            }
            Command::SearchPeople => {
                let params: SearchPeopleParams = parse(command, arguments)?;
                serde_json::to_value(
                    self.services
                        .people
                        .search_people(
                            &params.keywords,
                            params.limit.unwrap_or(DEFAULT_PEOPLE_LIMIT),
                        )
                        .await,
                )?
            }
            Command::Connections => {
                let params: ConnectionsParams = parse(command, arguments)?;
                serde_json::to_value(
                    self.services
                        .connections
                        .get_connections(
                            params.urn_id.as_deref(),
                            params.limit.unwrap_or(DEFAULT_CONNECTIONS_LIMIT),
                        )
                        .await,
                )?
            }
        };

        Ok(envelope)
    }

    async fn authenticate(&self, params: AuthenticateParams) -> AuthenticationOutcome {
        let credentials = CredentialConfig::new(params.email, params.password);
        if self.session.authenticate(credentials).await {
            AuthenticationOutcome {
                success: true,
                message: AUTHENTICATED_MESSAGE,
                authenticated_at: Some(Timestamp::now()),
            }
        } else {
            AuthenticationOutcome {
                success: false,
                message: AUTHENTICATION_FAILED_MESSAGE,
                authenticated_at: None,
            }
        }
    }

    async fn authentication_status(&self) -> AuthenticationStatus {
        let authenticated = self.session.is_authenticated().await;
        AuthenticationStatus {
            success: authenticated,
            authenticated,
            message: if authenticated {
                AUTHENTICATED_MESSAGE
            } else {
                NOT_AUTHENTICATED_MESSAGE
            },
        }
    }
}

fn parse<T: DeserializeOwned>(command: Command, arguments: Value) -> Result<T, DispatchError> {
    let arguments = if arguments.is_null() {
        Value::Object(Map::new())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| DispatchError::InvalidParams {
        command: command.name(),
        reason: e.to_string(),
    })
}
