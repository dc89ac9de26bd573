//! Authenticated session state for the LinkedIn MCP gateway.
//!
//! Provides:
//! - `Session` - The authentication state machine and owner of the remote client

pub mod session;

pub use session::Session;
