//! LinkedIn MCP gateway.
//!
//! Run with: cargo run -p linkedin-mcp-server -- --transport stdio

mod config;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use linkedin_mcp_client::HttpConnector;
use linkedin_mcp_session::Session;
use linkedin_mcp_transport::{
    Command as Tool, CommandRegistry, McpHandler, stdio::serve_stdio, websocket::serve_websocket,
};
use serde_json::{Value, json};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Args, CallArgs, Command, Transport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    if args.command == Some(Command::Tools) {
        print_tools();
        return Ok(());
    }

    // Logs go to stderr, stdout belongs to the stdio transport
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("linkedin_mcp={},info", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    args.validate()
        .map_err(|e| anyhow::anyhow!("Configuration error: {e}"))?;

    let connector = HttpConnector::with_timeout(&args.api_base_url, args.request_timeout())
        .with_context(|| format!("Invalid LinkedIn API base URL: {}", args.api_base_url))?;
    tracing::info!("LinkedIn API: {}", connector.base_url());

    let session = Arc::new(Session::new(Arc::new(connector)));
    let registry = CommandRegistry::new(session);

    if let Some(Command::Call(call)) = &args.command {
        for (tool, envelope) in run_call(&registry, call).await? {
            println!("[{tool}]");
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        return Ok(());
    }

    let handler = McpHandler::new(registry);

    tracing::info!("LinkedIn MCP Server starting");
    match args.transport {
        Transport::Stdio => serve_stdio(&handler).await.context("stdio transport failed")?,
        Transport::Websocket => serve_websocket(Arc::new(handler), args.listen)
            .await
            .with_context(|| format!("WebSocket transport on {} failed", args.listen))?,
    }

    Ok(())
}

/// Run one tool call, authenticating first when credentials are given.
/// Returns every envelope produced, in order, keyed by tool name.
async fn run_call(
    registry: &CommandRegistry,
    call: &CallArgs,
) -> anyhow::Result<Vec<(String, Value)>> {
    let arguments: Value = serde_json::from_str(&call.arguments)
        .with_context(|| format!("Tool arguments are not valid JSON: {}", call.arguments))?;

    let mut envelopes = Vec::new();
    if let Some((email, password)) = call.credentials() {
        let login = Tool::Authenticate.name();
        let outcome = registry
            .dispatch(login, json!({ "email": email, "password": password }))
            .await?;
        envelopes.push((login.to_string(), outcome));
    }

    let envelope = registry.dispatch(&call.tool, arguments).await?;
    envelopes.push((call.tool.clone(), envelope));
    Ok(envelopes)
}

fn print_tools() {
    println!("LinkedIn MCP Server");
    println!("Available tools:");
    for (i, tool) in Tool::ALL.iter().enumerate() {
        println!(
            "  {}. {} ({}): {}",
            i + 1,
            tool.name(),
            tool.alias(),
            tool.description()
        );
    }

    println!("\nExample usage:");
    println!("1. First authenticate:");
    println!("   linkedin-mcp call authenticate_linkedin \\");
    println!(r#"     '{{"email": "your_email@example.com", "password": "your_password"}}'"#);
    println!("\n2. Then use other tools (credentials from LINKEDIN_EMAIL/LINKEDIN_PASSWORD):");
    println!(r#"   linkedin-mcp call search_linkedin_jobs '{{"keywords": "python developer"}}'"#);
    println!("   linkedin-mcp call get_profile_info");
    println!("\nTo run as MCP server on stdio: linkedin-mcp");
    println!("To run over WebSocket: linkedin-mcp --transport websocket --listen 127.0.0.1:3000");
}

#[cfg(test)]
mod tests {
    use linkedin_mcp_client::MockConnector;

    use super::*;

    fn registry() -> CommandRegistry {
        let connector = MockConnector::new().with_jobs(vec![json!({ "title": "Rust engineer" })]);
        CommandRegistry::new(Arc::new(Session::new(Arc::new(connector))))
    }

    fn call(tool: &str, arguments: &str, credentials: Option<(&str, &str)>) -> CallArgs {
        CallArgs {
            tool: tool.to_string(),
            arguments: arguments.to_string(),
            email: credentials.map(|(email, _)| email.to_string()),
            password: credentials.map(|(_, password)| password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_call_authenticates_first() {
        let envelopes = run_call(
            &registry(),
            &call(
                "searchJobs",
                r#"{"keywords": "rust"}"#,
                Some(("me@example.com", "pw")),
            ),
        )
        .await
        .unwrap();

        assert_eq!(envelopes.len(), 2);
        assert_eq!(envelopes[0].0, "authenticate_linkedin");
        assert_eq!(envelopes[0].1["success"], true);
        assert_eq!(envelopes[1].0, "searchJobs");
        assert_eq!(envelopes[1].1["count"], 1);
    }

    #[tokio::test]
    async fn test_call_without_credentials_reports_unauthenticated() {
        let envelopes = run_call(&registry(), &call("get_profile_info", "{}", None))
            .await
            .unwrap();

        assert_eq!(envelopes.len(), 1);
        assert_eq!(envelopes[0].1["success"], false);
        assert!(
            envelopes[0].1["message"]
                .as_str()
                .unwrap()
                .contains("authenticate")
        );
    }

    #[tokio::test]
    async fn test_call_rejects_bad_json_and_unknown_tool() {
        assert!(
            run_call(&registry(), &call("get_profile_info", "{not json", None))
                .await
                .is_err()
        );
        assert!(
            run_call(&registry(), &call("send_message", "{}", None))
                .await
                .is_err()
        );
    }
}
