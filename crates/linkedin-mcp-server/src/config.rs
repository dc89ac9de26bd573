//! Command line and environment configuration.

use std::{net::SocketAddr, time::Duration};

use clap::{Parser, Subcommand, ValueEnum};

/// LinkedIn MCP Server
///
/// Exposes LinkedIn profile, post, job, people and connection lookups as MCP tools.
#[derive(Parser, Debug, Clone)]
#[command(name = "linkedin-mcp", version)]
#[command(about = "MCP gateway for LinkedIn")]
pub struct Args {
    /// Transport to serve MCP on
    #[arg(long, env = "MCP_TRANSPORT", value_enum, default_value_t = Transport::Stdio)]
    pub transport: Transport,

    /// Address to listen on (websocket transport)
    #[arg(long, env = "LISTEN", default_value = "127.0.0.1:3000")]
    pub listen: SocketAddr,

    /// Base URL of the LinkedIn REST bridge
    #[arg(long, env = "LINKEDIN_API_BASE_URL", default_value = "http://127.0.0.1:8000")]
    pub api_base_url: String,

    /// Per-request timeout for remote calls, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30")]
    pub request_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the available tools and example usage, then exit
    Tools,
    /// Call one tool against the configured API and print its result
    Call(CallArgs),
}

#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct CallArgs {
    /// Tool name or alias, e.g. search_linkedin_jobs
    pub tool: String,

    /// Tool arguments as a JSON object
    #[arg(default_value = "{}")]
    pub arguments: String,

    /// Email to authenticate with before the call
    #[arg(long, env = "LINKEDIN_EMAIL")]
    pub email: Option<String>,

    /// Password to authenticate with before the call
    #[arg(long, env = "LINKEDIN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl CallArgs {
    /// Login credentials, when both halves are given.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.email.as_deref()?, self.password.as_deref()?))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Line-delimited JSON-RPC on stdin/stdout
    Stdio,
    /// WebSocket on /ws and HTTP POST on /mcp
    Websocket,
}

impl Args {
    /// Validate values clap cannot check on its own.
    ///
    /// # Errors
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_secs == 0 {
            return Err("request timeout must be at least one second".to_string());
        }
        if self.api_base_url.trim().is_empty() {
            return Err("LinkedIn API base URL is empty".to_string());
        }
        Ok(())
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
