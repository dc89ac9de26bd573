//! Core abstractions for the LinkedIn MCP gateway.
//!
//! This crate provides the fundamental building blocks:
//! - `CredentialConfig` - Login credentials for one authentication attempt
//! - `RemoteClient` / `Connector` - Capability traits for the remote service
//! - `Envelope` and `Failure` - The uniform result contract of every operation
//! - Per-operation payload types

pub mod credentials;
pub mod envelope;
pub mod traits;

pub use credentials::CredentialConfig;
pub use envelope::{
    ConnectionsPayload, Envelope, Failure, JobPayload, JobsPayload, PeoplePayload, PostsPayload,
    ProfilePayload, Timestamp,
};
pub use traits::{Connector, JobSearchParams, RemoteClient, RemoteError};
